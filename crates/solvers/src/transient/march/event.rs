use tractive_core::Snapshot;

/// Event emitted by the march driver after each step.
///
/// Steps are numbered from 1; `step` is the number of completed steps.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,

    /// Snapshot of the model input and output for this step.
    pub snapshot: Snapshot<I, O>,
}
