use uom::si::{Dimension, Quantity, Units};

use super::{Constrained, Constraint, ConstraintError};

/// Types whose values can be infinite or NaN.
///
/// Implemented for `f64` and every `f64`-backed `uom` quantity.
pub trait Finiteness {
    fn is_finite_value(&self) -> bool;

    fn is_nan_value(&self) -> bool;
}

impl Finiteness for f64 {
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }

    fn is_nan_value(&self) -> bool {
        self.is_nan()
    }
}

impl<D, U> Finiteness for Quantity<D, U, f64>
where
    D: Dimension + ?Sized,
    U: Units<f64> + ?Sized,
{
    fn is_finite_value(&self) -> bool {
        self.value.is_finite()
    }

    fn is_nan_value(&self) -> bool {
        self.value.is_nan()
    }
}

/// Marker for values that are neither infinite nor NaN.
///
/// The sign markers accept `+∞`; pair them with this one wherever an
/// infinite value would flow into arithmetic.
///
/// ```
/// use tractive_core::constraint::{ConstraintError, Finite};
///
/// assert!(Finite::new(-3.5).is_ok());
/// assert_eq!(Finite::new(f64::INFINITY), Err(ConstraintError::NotFinite));
/// assert_eq!(Finite::new(f64::NAN), Err(ConstraintError::NotANumber));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finite;

impl Finite {
    /// Constructs a `Constrained<T, Finite>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] for NaN and
    /// [`ConstraintError::NotFinite`] for either infinity.
    pub fn new<T: Finiteness>(value: T) -> Result<Constrained<T, Finite>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: Finiteness> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan_value() {
            Err(ConstraintError::NotANumber)
        } else if value.is_finite_value() {
            Ok(())
        } else {
            Err(ConstraintError::NotFinite)
        }
    }
}
