use tractive_core::constraint::{Finite, NonNegative, StrictlyPositive};
use uom::si::{
    f64::{Area, Mass, ThermodynamicTemperature, Time, Velocity},
    mass::kilogram,
    thermodynamic_temperature::degree_celsius,
    time::second,
    velocity::meter_per_second,
};

use crate::error::{ConfigError, check};

/// Vehicle body and environment parameters.
///
/// `tire_grip` is carried for reporting only; traction limits come from the
/// per-step road surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleConfig {
    pub mass: Mass,
    pub cargo_mass: Mass,
    pub drag_coefficient: f64,
    pub frontal_area: Area,
    pub tire_grip: f64,
    pub ambient_temperature: ThermodynamicTemperature,
    pub time_step: Time,
    pub velocity_limit: Velocity,
}

impl VehicleConfig {
    /// Creates a configuration with defaults for everything but the body.
    ///
    /// Defaults: no cargo, tire grip 0.9, 25 °C ambient, a 0.01 s time step,
    /// and a 350 m/s velocity limit.
    #[must_use]
    pub fn new(mass: Mass, drag_coefficient: f64, frontal_area: Area) -> Self {
        Self {
            mass,
            cargo_mass: Mass::new::<kilogram>(0.0),
            drag_coefficient,
            frontal_area,
            tire_grip: 0.9,
            ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
            time_step: Time::new::<second>(0.01),
            velocity_limit: Velocity::new::<meter_per_second>(350.0),
        }
    }

    /// Returns `self` with the given cargo mass, keeping other fields unchanged.
    #[must_use]
    pub fn with_cargo_mass(self, cargo_mass: Mass) -> Self {
        Self { cargo_mass, ..self }
    }

    /// Returns `self` with the given tire grip, keeping other fields unchanged.
    #[must_use]
    pub fn with_tire_grip(self, tire_grip: f64) -> Self {
        Self { tire_grip, ..self }
    }

    /// Returns `self` with the given ambient temperature, keeping other fields unchanged.
    #[must_use]
    pub fn with_ambient_temperature(self, ambient_temperature: ThermodynamicTemperature) -> Self {
        Self {
            ambient_temperature,
            ..self
        }
    }

    /// Returns `self` with the given time step, keeping other fields unchanged.
    #[must_use]
    pub fn with_time_step(self, time_step: Time) -> Self {
        Self { time_step, ..self }
    }

    /// Returns `self` with the given velocity limit, keeping other fields unchanged.
    #[must_use]
    pub fn with_velocity_limit(self, velocity_limit: Velocity) -> Self {
        Self {
            velocity_limit,
            ..self
        }
    }

    /// Mass used for acceleration and traction: the vehicle plus its cargo.
    #[must_use]
    pub fn total_mass(&self) -> Mass {
        self.mass + self.cargo_mass
    }

    /// Checks every field that could make a step divide by zero, go negative,
    /// or produce a non-finite result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check::<_, StrictlyPositive>("mass", self.mass)?;
        check::<_, NonNegative>("cargo_mass", self.cargo_mass)?;
        check::<_, NonNegative>("drag_coefficient", self.drag_coefficient)?;
        check::<_, NonNegative>("frontal_area", self.frontal_area)?;
        check::<_, NonNegative>("tire_grip", self.tire_grip)?;
        check::<_, Finite>("ambient_temperature", self.ambient_temperature)?;
        check::<_, StrictlyPositive>("time_step", self.time_step)?;
        check::<_, StrictlyPositive>("velocity_limit", self.velocity_limit)?;
        Ok(())
    }
}
