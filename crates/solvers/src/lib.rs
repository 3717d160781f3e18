//! Run drivers for Tractive models.
//!
//! # Modules
//!
//! - [`transient`] — drivers that advance a model through time

pub mod transient;
