/// A discrete-time problem marched forward under a sequence of controls.
///
/// Each step combines the current state with an external control to build a
/// model input, calls the model, and reads the next state back out of the
/// model output. The model stays pure; the problem owns how state flows from
/// one call to the next.
///
/// This suits models whose step is not a plain ODE update, for example when a
/// discrete mode (a gear, a switch) changes as part of the step, or when the
/// stepped value is clamped.
pub trait MarchProblem {
    type Input;
    type Output;
    type State;
    type Control;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the model input for one step.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed.
    fn build_input(
        &self,
        state: &Self::State,
        control: Self::Control,
    ) -> Result<Self::Input, Self::Error>;

    /// Extracts the state that the next step starts from.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be recovered from the output.
    fn next_state(&self, output: &Self::Output) -> Result<Self::State, Self::Error>;
}
