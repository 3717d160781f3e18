use uom::si::f64::AngularVelocity;

use crate::{
    controls::{Controls, DrivingStyle},
    dynamics::{StepOutcome, VehicleDynamics},
    state::DriveState,
};

/// Steps [`VehicleDynamics`] in place.
///
/// The simulator owns the current [`DriveState`] and replaces it after each
/// step. Use [`VehicleDynamics::step`] directly to keep every state value.
#[derive(Debug, Clone)]
pub struct VehicleSimulator {
    dynamics: VehicleDynamics,
    state: DriveState,
}

impl VehicleSimulator {
    /// Starts from [`DriveState::initial`].
    #[must_use]
    pub fn new(dynamics: VehicleDynamics) -> Self {
        Self {
            dynamics,
            state: DriveState::initial(),
        }
    }

    /// Returns `self` starting from `state` instead.
    #[must_use]
    pub fn with_state(self, state: DriveState) -> Self {
        Self { state, ..self }
    }

    #[must_use]
    pub fn state(&self) -> &DriveState {
        &self.state
    }

    #[must_use]
    pub fn dynamics(&self) -> &VehicleDynamics {
        &self.dynamics
    }

    /// Applies or releases the brake for subsequent steps.
    pub fn set_braking(&mut self, is_braking: bool) {
        self.state.vehicle.is_braking = is_braking;
    }

    /// Advances one step and keeps the resulting state.
    pub fn advance(&mut self, controls: &Controls) -> StepOutcome {
        let outcome = self.dynamics.step(&self.state, controls);
        self.state = outcome.state;
        outcome
    }

    /// Advances one step from plain scalars.
    ///
    /// Returns `(velocity, position, acceleration, fuel, regen)` with velocity
    /// in m/s, position in m, and acceleration in m/s².
    pub fn update(
        &mut self,
        rpm: f64,
        slope_degrees: f64,
        style: DrivingStyle,
        road_surface: f64,
    ) -> (f64, f64, f64, f64, f64) {
        let controls = Controls::from_scalars(rpm, slope_degrees, style, road_surface);
        self.advance(&controls).report.as_tuple()
    }

    /// Advances one step at `rpm` on a flat dry road in eco mode.
    pub fn update_at(&mut self, rpm: AngularVelocity) -> (f64, f64, f64, f64, f64) {
        self.advance(&Controls::new(rpm)).report.as_tuple()
    }
}
