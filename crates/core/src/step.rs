/// A value that can be advanced by one step given its derivative.
///
/// `Delta` is the independent variable of the step, usually a
/// [`uom::si::f64::Time`] so that mismatched units are rejected at compile
/// time. Implementations decide the update rule; bounded quantities may clamp
/// inside `step` so that every stepped value satisfies the type's invariants.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with `derivative` over `delta`.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// The derivative of a [`StepIntegrable`] type with respect to `Delta`.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
