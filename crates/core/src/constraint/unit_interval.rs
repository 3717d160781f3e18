use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Types with a notion of zero and one, used by the unit-interval constraint.
///
/// Implemented for `f64` and `uom::si::f64::Ratio`.
pub trait UnitBounds: PartialOrd + Sized {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }

    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker for values in the left-open unit interval: `0 < x ≤ 1`.
///
/// This is the natural domain of an efficiency: a perfectly lossless stage is
/// allowed, a stage that transmits nothing is not.
///
/// ```
/// use tractive_core::constraint::UnitIntervalLeftOpen;
/// use uom::si::{f64::Ratio, ratio::ratio};
///
/// let eta = UnitIntervalLeftOpen::new(Ratio::new::<ratio>(0.95)).unwrap();
/// assert_eq!(eta.into_inner().get::<ratio>(), 0.95);
///
/// assert!(UnitIntervalLeftOpen::new(0.0).is_err());
/// assert!(UnitIntervalLeftOpen::new(1.0).is_ok());
/// assert!(UnitIntervalLeftOpen::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIntervalLeftOpen;

impl UnitIntervalLeftOpen {
    /// Constructs a `Constrained<T, UnitIntervalLeftOpen>` if `0 < value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if `value ≤ 0`.
    /// - [`ConstraintError::AboveMaximum`] if `value > 1`.
    /// - [`ConstraintError::NotANumber`] if the value is NaN.
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLeftOpen>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLeftOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.partial_cmp(&T::zero()).is_none() {
            return Err(ConstraintError::NotANumber);
        }
        if *value <= T::zero() {
            return Err(ConstraintError::BelowMinimum);
        }
        if *value > T::one() {
            return Err(ConstraintError::AboveMaximum);
        }
        Ok(())
    }
}
