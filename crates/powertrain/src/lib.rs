//! Engine, transmission, and longitudinal vehicle dynamics.
//!
//! The models form a chain, leaves first:
//!
//! - [`Engine`] maps engine speed to torque, power, and an efficiency factor.
//! - [`Transmission`] is a gear-shift state machine over an explicit
//!   [`GearState`].
//! - [`VehicleDynamics`] combines both with a vehicle body and advances a
//!   [`DriveState`] by one fixed time step per [`Controls`].
//!
//! Every model is pure and implements [`tractive_core::Model`]. Steps consume a
//! state value and return the next one, so a run can be replayed from any
//! recorded state. [`DriveProblem`] lets the `march` driver in
//! `tractive-solvers` thread state through a whole control sequence, and
//! [`VehicleSimulator`] offers in-place stepping for simple loops.
//!
//! Configuration is validated once at construction, either from typed
//! builders or from a TOML file through [`SimulationConfig`].

pub mod config;
pub mod controls;
pub mod dynamics;
pub mod engine;
pub mod series;
pub mod simulator;
pub mod state;
pub mod transmission;
pub mod vehicle;

mod error;

pub use config::SimulationConfig;
pub use controls::{Controls, DrivingStyle};
pub use dynamics::{
    DriveInput, DriveProblem, ForceBalance, StepOutcome, StepReport, VehicleDynamics,
};
pub use engine::{Engine, EngineConfig};
pub use error::ConfigError;
pub use series::DriveSeries;
pub use simulator::VehicleSimulator;
pub use state::{DriveState, VehicleState};
pub use transmission::{GearState, Transmission, TransmissionConfig};
pub use vehicle::VehicleConfig;
