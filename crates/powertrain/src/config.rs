//! File-based configuration.
//!
//! A configuration file is a TOML document with `[engine]`, `[transmission]`,
//! and `[vehicle]` tables. Values are plain numbers in natural units:
//!
//! ```toml
//! [engine]
//! max_torque = 800.0    # N·m
//! max_power = 800.0     # kW
//! max_rpm = 16000.0
//! efficiency = 0.85
//!
//! [transmission]
//! gear_ratios = [4.0, 2.5, 1.5, 1.0]
//! efficiency = 0.95
//!
//! [vehicle]
//! mass = 1500.0               # kg
//! drag_coefficient = 0.32
//! frontal_area = 2.2          # m²
//! cargo_mass = 200.0          # kg
//! ambient_temperature = 25.0  # °C
//! time_step = 0.01            # s
//! velocity_limit = 350.0      # m/s
//! ```
//!
//! Omitted optional keys take their defaults. Unknown keys are rejected.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;
use uom::si::{
    angular_velocity::revolution_per_minute,
    area::square_meter,
    f64::{
        AngularVelocity, Area, Mass, Power, Ratio, ThermodynamicTemperature, Time, Torque,
        Velocity,
    },
    mass::kilogram,
    power::kilowatt,
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
    time::second,
    torque::newton_meter,
    velocity::meter_per_second,
};

use crate::{
    dynamics::VehicleDynamics,
    engine::{Engine, EngineConfig},
    error::ConfigError,
    transmission::{Transmission, TransmissionConfig},
    vehicle::VehicleConfig,
};

/// A complete simulation setup as read from a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub engine: EngineSection,
    pub transmission: TransmissionSection,
    pub vehicle: VehicleSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// N·m.
    pub max_torque: f64,
    /// kW.
    pub max_power: f64,
    pub max_rpm: f64,
    #[serde(default = "default_engine_efficiency")]
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransmissionSection {
    pub gear_ratios: Vec<f64>,
    #[serde(default = "default_transmission_efficiency")]
    pub efficiency: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleSection {
    /// kg.
    #[serde(alias = "weight")]
    pub mass: f64,
    pub drag_coefficient: f64,
    /// m².
    pub frontal_area: f64,
    #[serde(default = "default_tire_grip")]
    pub tire_grip: f64,
    /// kg.
    #[serde(default, alias = "cargo_weight")]
    pub cargo_mass: f64,
    /// °C.
    #[serde(default = "default_ambient_temperature")]
    pub ambient_temperature: f64,
    /// s.
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    /// m/s.
    #[serde(default = "default_velocity_limit")]
    pub velocity_limit: f64,
}

fn default_engine_efficiency() -> f64 {
    0.85
}

fn default_transmission_efficiency() -> f64 {
    0.95
}

fn default_tire_grip() -> f64 {
    0.9
}

fn default_ambient_temperature() -> f64 {
    25.0
}

fn default_time_step() -> f64 {
    0.01
}

fn default_velocity_limit() -> f64 {
    350.0
}

impl SimulationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML, a required
    /// key is missing, or an unknown key is present.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "read simulation config");
        Self::from_toml_str(&text)
    }

    /// Validates every section and builds the dynamics model.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by the engine, transmission,
    /// or vehicle.
    pub fn build(&self) -> Result<VehicleDynamics, ConfigError> {
        let engine = Engine::new(self.engine.to_config())?;
        let transmission = Transmission::new(self.transmission.to_config())?;
        VehicleDynamics::new(engine, transmission, self.vehicle.to_config())
    }
}

impl EngineSection {
    #[must_use]
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig::new(
            Torque::new::<newton_meter>(self.max_torque),
            Power::new::<kilowatt>(self.max_power),
            AngularVelocity::new::<revolution_per_minute>(self.max_rpm),
        )
        .with_base_efficiency(Ratio::new::<ratio>(self.efficiency))
    }
}

impl TransmissionSection {
    #[must_use]
    pub fn to_config(&self) -> TransmissionConfig {
        TransmissionConfig::new(self.gear_ratios.clone())
            .with_efficiency(Ratio::new::<ratio>(self.efficiency))
    }
}

impl VehicleSection {
    #[must_use]
    pub fn to_config(&self) -> VehicleConfig {
        VehicleConfig::new(
            Mass::new::<kilogram>(self.mass),
            self.drag_coefficient,
            Area::new::<square_meter>(self.frontal_area),
        )
        .with_cargo_mass(Mass::new::<kilogram>(self.cargo_mass))
        .with_tire_grip(self.tire_grip)
        .with_ambient_temperature(ThermodynamicTemperature::new::<degree_celsius>(
            self.ambient_temperature,
        ))
        .with_time_step(Time::new::<second>(self.time_step))
        .with_velocity_limit(Velocity::new::<meter_per_second>(self.velocity_limit))
    }
}
