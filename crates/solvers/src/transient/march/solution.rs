use tractive_core::Snapshot;

/// Indicates how the driver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Consumed every control in the sequence.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a march.
#[derive(Debug, Clone)]
pub struct Solution<I, O, S> {
    pub status: Status,

    /// One snapshot per completed step, in order.
    pub history: Vec<Snapshot<I, O>>,

    /// Number of steps completed.
    pub steps: usize,

    /// The state the next step would start from.
    pub final_state: S,
}
