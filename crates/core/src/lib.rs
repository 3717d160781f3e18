//! Core traits and types for Tractive.
//!
//! This crate defines the shared abstractions that the powertrain models and
//! the run driver build on:
//!
//! - [`Model`] — a deterministic callable from a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives driver events and optionally returns control actions
//! - [`MarchProblem`] — threads state from one model call to the next under an
//!   external sequence of controls
//! - [`StepIntegrable`] — a value that advances itself given its derivative
//! - [`constraint`] — numeric invariants checked once at construction

pub mod constraint;

mod model;
mod observer;
mod problem;
mod step;

pub use observer::Observer;
pub use problem::MarchProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
