use tractive_core::StepIntegrable;
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::degree,
    f64::{Acceleration, Angle, Length, MassDensity, Time, Velocity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::transmission::GearState;

/// Speed a vehicle starts from, just above standstill.
const INITIAL_VELOCITY: f64 = 0.1;

/// Sea-level air density at 25 °C, in kg/m³.
pub(crate) const REFERENCE_AIR_DENSITY: f64 = 1.225;

/// Evolving vehicle quantities.
///
/// A step consumes one `VehicleState` and returns the next; nothing about the
/// vehicle changes between steps except through this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// Forward speed, within `[0, velocity_limit]`.
    pub velocity: Velocity,
    /// Distance travelled; never decreases.
    pub position: Length,
    pub acceleration: Acceleration,
    pub is_braking: bool,
    /// Road slope of the most recent step.
    pub slope: Angle,
    /// Air density of the most recent step.
    pub air_density: MassDensity,
}

impl VehicleState {
    /// A vehicle creeping at 0.1 m/s at the origin, not braking, on a flat road.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            velocity: Velocity::new::<meter_per_second>(INITIAL_VELOCITY),
            position: Length::new::<meter>(0.0),
            acceleration: Acceleration::new::<meter_per_second_squared>(0.0),
            is_braking: false,
            slope: Angle::new::<degree>(0.0),
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(REFERENCE_AIR_DENSITY),
        }
    }

    /// Returns `self` with the given velocity, keeping other fields unchanged.
    #[must_use]
    pub fn with_velocity(self, velocity: Velocity) -> Self {
        Self { velocity, ..self }
    }

    /// Returns `self` with the given position, keeping other fields unchanged.
    #[must_use]
    pub fn with_position(self, position: Length) -> Self {
        Self { position, ..self }
    }

    /// Returns `self` with the brake applied or released.
    #[must_use]
    pub fn with_braking(self, is_braking: bool) -> Self {
        Self { is_braking, ..self }
    }
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Everything a step carries forward: the vehicle and the engaged gear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveState {
    pub vehicle: VehicleState,
    pub gear: GearState,
}

impl DriveState {
    /// The initial vehicle state in first gear.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            vehicle: VehicleState::initial(),
            gear: GearState::first(),
        }
    }
}

/// Longitudinal motion bounded to `[0, velocity_limit]`.
///
/// Stepping is explicit Euler on velocity, clamped to the bounds, followed by
/// a position update that uses the clamped velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Motion {
    pub velocity: Velocity,
    pub position: Length,
    pub velocity_limit: Velocity,
}

impl StepIntegrable<Time> for Motion {
    type Derivative = Acceleration;

    fn step(&self, acceleration: Acceleration, dt: Time) -> Self {
        let unbounded = self.velocity + acceleration * dt;
        let velocity = if unbounded > self.velocity_limit {
            self.velocity_limit
        } else if unbounded.get::<meter_per_second>() > 0.0 {
            unbounded
        } else {
            Velocity::new::<meter_per_second>(0.0)
        };

        Self {
            velocity,
            position: self.position + velocity * dt,
            velocity_limit: self.velocity_limit,
        }
    }
}
