//! Fixed-step marching under an external control sequence.
//!
//! The driver threads a state through a pure model, one control per step:
//!
//! ```text
//! input_n  = build_input(state_n, control_n)
//! output_n = model(input_n)
//! state_{n+1} = next_state(output_n)
//! ```
//!
//! The controls are supplied by the caller (an RPM schedule, a road profile),
//! so the run length is the length of the control sequence unless an observer
//! stops it first.
//!
//! # Example
//!
//! ```ignore
//! use tractive_solvers::transient::march;
//!
//! let solution = march::solve_unobserved(&model, &problem, initial_state, controls)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use tracing::debug;
use tractive_core::{MarchProblem, Model, Observer, Snapshot};

/// Marches a model through a sequence of controls.
///
/// # Algorithm
///
/// For each control, in order:
/// 1. Build the model input from the current state and the control.
/// 2. Call the model.
/// 3. Record the snapshot and emit an [`Event`] to the observer.
/// 4. Extract the next state from the output.
/// 5. If the observer returned [`Action::StopEarly`], terminate.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any step. The error
/// carries the number of the step that failed.
pub fn solve<M, P, C, Obs>(
    model: &M,
    problem: &P,
    initial: P::State,
    controls: C,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output, P::State>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: MarchProblem<Input = M::Input, Output = M::Output>,
    C: IntoIterator<Item = P::Control>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let controls = controls.into_iter();
    let mut history = Vec::with_capacity(controls.size_hint().0);
    let mut state = initial;
    let mut steps = 0;

    for control in controls {
        let step = steps + 1;

        let input = problem
            .build_input(&state, control)
            .map_err(|err| Error::problem(step, err))?;
        let output = model
            .call(&input)
            .map_err(|err| Error::model(step, err))?;
        let snapshot = Snapshot::new(input, output);

        let action = observer.observe(&Event {
            step,
            snapshot: snapshot.clone(),
        });

        state = problem
            .next_state(&snapshot.output)
            .map_err(|err| Error::problem(step, err))?;
        history.push(snapshot);
        steps = step;

        if let Some(Action::StopEarly) = action {
            debug!(step, "march stopped by observer");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps,
                final_state: state,
            });
        }
    }

    debug!(steps, "march complete");
    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
        final_state: state,
    })
}

/// Marches a model through a sequence of controls without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any step.
pub fn solve_unobserved<M, P, C>(
    model: &M,
    problem: &P,
    initial: P::State,
    controls: C,
) -> Result<Solution<M::Input, M::Output, P::State>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: MarchProblem<Input = M::Input, Output = M::Output>,
    C: IntoIterator<Item = P::Control>,
{
    solve(model, problem, initial, controls, ())
}
