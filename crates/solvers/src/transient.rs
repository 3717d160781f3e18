//! Drivers that advance a model through simulated time.
//!
//! - [`march`] — fixed-step marching under an external sequence of controls

pub mod march;
