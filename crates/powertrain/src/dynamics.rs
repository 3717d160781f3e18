//! Longitudinal vehicle dynamics.
//!
//! [`VehicleDynamics`] advances a [`DriveState`] by one fixed time step under
//! one set of [`Controls`]. A step:
//!
//! 1. shifts the transmission once at the requested engine speed,
//! 2. scales engine power by its efficiency and the driving style,
//! 3. balances tractive force against aerodynamic drag and gravity,
//! 4. derates the net force by the road surface when it exceeds traction,
//! 5. integrates velocity (clamped) and then position with explicit Euler,
//! 6. estimates fuel use and, while braking, recovered energy.
//!
//! Gravity acts on the vehicle mass alone while acceleration divides the net
//! force by vehicle plus cargo mass.

use std::convert::Infallible;

use tractive_core::{MarchProblem, Model, StepIntegrable};
use tracing::trace;
use uom::si::{
    acceleration::meter_per_second_squared,
    angle::radian,
    area::square_meter,
    f64::{Acceleration, Force, Length, MassDensity, Power, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    power::{kilowatt, watt},
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
    velocity::meter_per_second,
};

use crate::{
    controls::Controls,
    engine::Engine,
    error::ConfigError,
    state::{DriveState, Motion, REFERENCE_AIR_DENSITY, VehicleState},
    transmission::{Shift, Transmission},
    vehicle::VehicleConfig,
};

/// Standard gravity, in m/s².
const GRAVITY: f64 = 9.81;

/// Temperature at which air has the reference density, in °C.
const REFERENCE_TEMPERATURE: f64 = 25.0;

/// Relative change in air density per °C away from the reference.
const AIR_DENSITY_SENSITIVITY: f64 = 0.0002;

/// Speed floor used when converting power to tractive force, in m/s.
const MIN_TRACTION_SPEED: f64 = 0.1;

/// Deceleration added while the brake is applied, in m/s².
const BRAKING_DECELERATION: f64 = 5.0;

/// Fuel per step is `power_kw / FUEL_POWER_SCALE * FUEL_FACTOR`.
const FUEL_POWER_SCALE: f64 = 20_000.0;
const FUEL_FACTOR: f64 = 0.5;

/// Fraction of the step's fuel recovered while braking.
const REGEN_FRACTION: f64 = 0.5;

/// Upper bound on recovered energy per step.
const MAX_REGEN: f64 = 10.0;

/// The five per-step outputs consumed by reporting.
///
/// Fuel and regen are in the model's own arbitrary units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub velocity: Velocity,
    pub position: Length,
    pub acceleration: Acceleration,
    pub fuel_consumption: f64,
    pub regen_energy: f64,
}

impl StepReport {
    /// The report as `(velocity, position, acceleration, fuel, regen)` in SI.
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.velocity.get::<meter_per_second>(),
            self.position.get::<meter>(),
            self.acceleration.get::<meter_per_second_squared>(),
            self.fuel_consumption,
            self.regen_energy,
        )
    }
}

/// Longitudinal forces of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBalance {
    pub tractive: Force,
    pub drag: Force,
    pub gravity: Force,
    /// Net force after any traction derate.
    pub net: Force,
    /// Whether the net force exceeded available traction and was derated.
    pub traction_limited: bool,
}

/// Everything one step produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// The state the next step starts from.
    pub state: DriveState,
    pub report: StepReport,
    pub shift: Shift,
    pub forces: ForceBalance,
    /// Engine power delivered after efficiency and driving-style scaling.
    pub power: Power,
}

/// Input to [`VehicleDynamics`] when evaluated as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveInput {
    pub state: DriveState,
    pub controls: Controls,
}

/// Engine, transmission, and vehicle body stepped together.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDynamics {
    engine: Engine,
    transmission: Transmission,
    vehicle: VehicleConfig,
}

impl VehicleDynamics {
    /// Combines validated engine and transmission models with a vehicle body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the vehicle configuration is invalid.
    pub fn new(
        engine: Engine,
        transmission: Transmission,
        vehicle: VehicleConfig,
    ) -> Result<Self, ConfigError> {
        vehicle.validate()?;
        Ok(Self {
            engine,
            transmission,
            vehicle,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn transmission(&self) -> &Transmission {
        &self.transmission
    }

    #[must_use]
    pub fn vehicle(&self) -> &VehicleConfig {
        &self.vehicle
    }

    /// Air density at the configured ambient temperature.
    #[must_use]
    pub fn air_density(&self) -> MassDensity {
        let ambient = self.vehicle.ambient_temperature.get::<degree_celsius>();
        MassDensity::new::<kilogram_per_cubic_meter>(
            REFERENCE_AIR_DENSITY
                * (1.0 - AIR_DENSITY_SENSITIVITY * (ambient - REFERENCE_TEMPERATURE)),
        )
    }

    /// Advances `state` by one time step under `controls`.
    ///
    /// The step never fails. Velocity stays within `[0, velocity_limit]` and
    /// position never decreases.
    #[must_use]
    pub fn step(&self, state: &DriveState, controls: &Controls) -> StepOutcome {
        let vehicle = &state.vehicle;
        let air_density = self.air_density();

        let shift = self
            .transmission
            .shift(state.gear, controls.rpm, self.engine.max_rpm());

        let power_kw = self.engine.power(controls.rpm).get::<kilowatt>()
            * self.engine.efficiency_factor(controls.rpm).get::<ratio>()
            * controls.style.power_multiplier();
        let power = Power::new::<kilowatt>(power_kw);

        let forces = self.force_balance(vehicle, controls, &shift, power, air_density);

        let total_mass = self.vehicle.total_mass().get::<kilogram>();
        let mut acceleration = forces.net.get::<newton>() / total_mass;
        if vehicle.is_braking {
            acceleration -= BRAKING_DECELERATION;
        }
        let acceleration = Acceleration::new::<meter_per_second_squared>(acceleration);

        let motion = Motion {
            velocity: vehicle.velocity,
            position: vehicle.position,
            velocity_limit: self.vehicle.velocity_limit,
        }
        .step(acceleration, self.vehicle.time_step);

        let fuel_consumption = power_kw / FUEL_POWER_SCALE * FUEL_FACTOR;
        let regen_energy = if vehicle.is_braking {
            (fuel_consumption * REGEN_FRACTION).min(MAX_REGEN)
        } else {
            0.0
        };

        let next = VehicleState {
            velocity: motion.velocity,
            position: motion.position,
            acceleration,
            is_braking: vehicle.is_braking,
            slope: controls.slope,
            air_density,
        };

        StepOutcome {
            state: DriveState {
                vehicle: next,
                gear: shift.gear,
            },
            report: StepReport {
                velocity: next.velocity,
                position: next.position,
                acceleration,
                fuel_consumption,
                regen_energy,
            },
            shift,
            forces,
            power,
        }
    }

    fn force_balance(
        &self,
        vehicle: &VehicleState,
        controls: &Controls,
        shift: &Shift,
        power: Power,
        air_density: MassDensity,
    ) -> ForceBalance {
        let velocity = vehicle.velocity.get::<meter_per_second>();
        let mass = self.vehicle.mass.get::<kilogram>();
        let total_mass = self.vehicle.total_mass().get::<kilogram>();

        let tractive = power.get::<watt>()
            * shift.ratio
            * self.transmission.efficiency().get::<ratio>()
            / velocity.max(MIN_TRACTION_SPEED);
        let drag = 0.5
            * self.vehicle.drag_coefficient
            * air_density.get::<kilogram_per_cubic_meter>()
            * self.vehicle.frontal_area.get::<square_meter>()
            * velocity
            * velocity;
        let gravity = mass * GRAVITY * controls.slope.get::<radian>().sin();

        let mut net = tractive - drag - gravity;
        let traction = controls.road_surface * total_mass * GRAVITY;
        let traction_limited = net.abs() > traction;
        if traction_limited {
            trace!(net, traction, "net force exceeds traction, derating");
            net *= controls.road_surface;
        }

        ForceBalance {
            tractive: Force::new::<newton>(tractive),
            drag: Force::new::<newton>(drag),
            gravity: Force::new::<newton>(gravity),
            net: Force::new::<newton>(net),
            traction_limited,
        }
    }
}

impl Model for VehicleDynamics {
    type Input = DriveInput;
    type Output = StepOutcome;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.step(&input.state, &input.controls))
    }
}

/// Threads a [`DriveState`] through [`VehicleDynamics`] one [`Controls`] at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveProblem;

impl MarchProblem for DriveProblem {
    type Input = DriveInput;
    type Output = StepOutcome;
    type State = DriveState;
    type Control = Controls;
    type Error = Infallible;

    fn build_input(
        &self,
        state: &DriveState,
        controls: Controls,
    ) -> Result<DriveInput, Infallible> {
        Ok(DriveInput {
            state: *state,
            controls,
        })
    }

    fn next_state(&self, output: &StepOutcome) -> Result<DriveState, Infallible> {
        Ok(output.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angular_velocity::revolution_per_minute,
        f64::{AngularVelocity, Area, Mass, ThermodynamicTemperature, Torque},
        torque::newton_meter,
    };

    use crate::{
        controls::DrivingStyle,
        engine::EngineConfig,
        transmission::{GearState, ShiftDirection, TransmissionConfig},
    };

    fn dynamics() -> VehicleDynamics {
        let engine = Engine::new(EngineConfig::new(
            Torque::new::<newton_meter>(800.0),
            Power::new::<kilowatt>(800.0),
            AngularVelocity::new::<revolution_per_minute>(16_000.0),
        ))
        .unwrap();
        let transmission =
            Transmission::new(TransmissionConfig::new([4.0, 2.5, 1.5, 1.0])).unwrap();
        let vehicle = VehicleConfig::new(
            Mass::new::<kilogram>(1500.0),
            0.32,
            Area::new::<square_meter>(2.2),
        )
        .with_cargo_mass(Mass::new::<kilogram>(200.0));
        VehicleDynamics::new(engine, transmission, vehicle).unwrap()
    }

    fn at_speed(velocity: f64) -> DriveState {
        DriveState {
            vehicle: VehicleState::initial()
                .with_velocity(Velocity::new::<meter_per_second>(velocity)),
            gear: GearState::first(),
        }
    }

    #[test]
    fn first_step_from_rest() {
        let outcome = dynamics().step(
            &DriveState::initial(),
            &Controls::from_scalars(1_000.0, 0.0, DrivingStyle::Eco, 0.9),
        );

        let (velocity, position, acceleration, fuel, regen) = outcome.report.as_tuple();
        assert_relative_eq!(velocity, 1.532535386610339, max_relative = 1e-9);
        assert_relative_eq!(position, 0.01532535386610339, max_relative = 1e-9);
        assert_relative_eq!(acceleration, 143.2535386610339, max_relative = 1e-9);
        assert_relative_eq!(fuel, 0.00017801975117292228, max_relative = 1e-9);
        assert_eq!(regen, 0.0);

        assert!(outcome.forces.traction_limited);
        assert_eq!(outcome.shift.direction, ShiftDirection::Hold);
        assert_eq!(outcome.state.gear, GearState::first());
    }

    #[test]
    fn braking_decelerates_and_recovers_energy() {
        let state = DriveState {
            vehicle: VehicleState::initial().with_braking(true),
            ..DriveState::initial()
        };
        let outcome = dynamics().step(
            &state,
            &Controls::from_scalars(1_000.0, 0.0, DrivingStyle::Eco, 0.9),
        );

        let (velocity, position, acceleration, fuel, regen) = outcome.report.as_tuple();
        assert_relative_eq!(velocity, 1.482535386610339, max_relative = 1e-9);
        assert_relative_eq!(position, 0.01482535386610339, max_relative = 1e-9);
        assert_relative_eq!(acceleration, 138.2535386610339, max_relative = 1e-9);
        assert_relative_eq!(regen, 8.900987558646114e-05, max_relative = 1e-9);
        assert_relative_eq!(regen, fuel * 0.5);
        assert!(outcome.state.vehicle.is_braking);
    }

    #[test]
    fn regen_is_capped_per_step() {
        let base = dynamics();
        let engine = Engine::new(EngineConfig::new(
            Torque::new::<newton_meter>(8.0e6),
            Power::new::<kilowatt>(800.0),
            rpm(16_000.0),
        ))
        .unwrap();
        let dynamics =
            VehicleDynamics::new(engine, base.transmission().clone(), *base.vehicle()).unwrap();
        let state = DriveState {
            vehicle: VehicleState::initial().with_braking(true),
            ..DriveState::initial()
        };

        let outcome = dynamics.step(
            &state,
            &Controls::from_scalars(8_000.0, 0.0, DrivingStyle::Performance, 0.9),
        );

        let (_, _, _, fuel, regen) = outcome.report.as_tuple();
        assert!(fuel * 0.5 > 10.0, "fuel {fuel} should exceed the cap");
        assert_eq!(regen, 10.0);
    }

    #[test]
    fn resumes_from_a_travelled_position() {
        let state = DriveState {
            vehicle: VehicleState::initial()
                .with_velocity(Velocity::new::<meter_per_second>(12.0))
                .with_position(Length::new::<meter>(100.0)),
            gear: GearState::first(),
        };
        let outcome = dynamics().step(
            &state,
            &Controls::from_scalars(2_000.0, 0.0, DrivingStyle::Normal, 0.9),
        );

        let (velocity, position, ..) = outcome.report.as_tuple();
        assert!(velocity > 0.0);
        assert_relative_eq!(position, 100.0 + velocity * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn performance_style_scales_power() {
        let outcome = dynamics().step(
            &DriveState::initial(),
            &Controls::from_scalars(1_000.0, 0.0, DrivingStyle::Performance, 0.9),
        );

        let (velocity, _, acceleration, fuel, _) = outcome.report.as_tuple();
        assert_relative_eq!(velocity, 2.248803091329626, max_relative = 1e-9);
        assert_relative_eq!(acceleration, 214.8803091329626, max_relative = 1e-9);
        assert_relative_eq!(fuel, 0.0002670296267593834, max_relative = 1e-9);
    }

    #[test]
    fn climbing_on_a_slippery_road() {
        let outcome = dynamics().step(
            &at_speed(10.0),
            &Controls::from_scalars(8_000.0, 5.0, DrivingStyle::Normal, 0.6),
        );

        let (velocity, position, acceleration, fuel, _) = outcome.report.as_tuple();
        assert_relative_eq!(velocity, 10.758946963733415, max_relative = 1e-9);
        assert_relative_eq!(position, 0.10758946963733415, max_relative = 1e-9);
        assert_relative_eq!(acceleration, 75.89469637334142, max_relative = 1e-9);
        assert_relative_eq!(fuel, 0.014234249329758714, max_relative = 1e-9);

        // Gravity uses the vehicle mass without cargo.
        let gravity = outcome.forces.gravity.get::<newton>();
        assert_relative_eq!(
            gravity,
            1500.0 * 9.81 * 5f64.to_radians().sin(),
            max_relative = 1e-9
        );
        assert!(outcome.forces.traction_limited);
        assert_relative_eq!(outcome.state.vehicle.slope.get::<radian>(), 5f64.to_radians());
    }

    #[test]
    fn cruising_within_traction() {
        let outcome = dynamics().step(
            &at_speed(30.0),
            &Controls::from_scalars(1_000.0, 0.0, DrivingStyle::Normal, 0.9),
        );

        let forces = outcome.forces;
        assert!(!forces.traction_limited);
        assert_relative_eq!(
            forces.tractive.get::<newton>(),
            1127.4584240951742,
            max_relative = 1e-9
        );
        assert_relative_eq!(forces.drag.get::<newton>(), 388.08, max_relative = 1e-9);
        assert_relative_eq!(
            forces.net.get::<newton>(),
            739.3784240951742,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            outcome.report.velocity.get::<meter_per_second>(),
            30.004349284847617,
            max_relative = 1e-9
        );
    }

    #[test]
    fn velocity_stays_within_bounds() {
        let dynamics = dynamics();

        let braking = DriveState {
            vehicle: VehicleState::initial()
                .with_velocity(Velocity::new::<meter_per_second>(0.02))
                .with_braking(true),
            ..DriveState::initial()
        };
        let stopped = dynamics.step(
            &braking,
            &Controls::from_scalars(0.0, 0.0, DrivingStyle::Eco, 0.9),
        );
        assert_eq!(stopped.report.velocity.get::<meter_per_second>(), 0.0);
        assert_eq!(stopped.report.position.get::<meter>(), 0.0);

        let capped = VehicleDynamics::new(
            *dynamics.engine(),
            dynamics.transmission().clone(),
            dynamics
                .vehicle()
                .with_velocity_limit(Velocity::new::<meter_per_second>(5.0)),
        )
        .unwrap();
        let flat_out = capped.step(
            &at_speed(4.9),
            &Controls::from_scalars(8_000.0, 0.0, DrivingStyle::Performance, 1.0),
        );
        assert_relative_eq!(flat_out.report.velocity.get::<meter_per_second>(), 5.0);
        assert_relative_eq!(flat_out.report.position.get::<meter>(), 0.05);
    }

    #[test]
    fn air_density_follows_ambient_temperature() {
        let dynamics = dynamics();
        assert_relative_eq!(dynamics.air_density().get::<kilogram_per_cubic_meter>(), 1.225);

        let warm = VehicleDynamics::new(
            *dynamics.engine(),
            dynamics.transmission().clone(),
            dynamics
                .vehicle()
                .with_ambient_temperature(ThermodynamicTemperature::new::<degree_celsius>(35.0)),
        )
        .unwrap();
        assert_relative_eq!(
            warm.air_density().get::<kilogram_per_cubic_meter>(),
            1.22255,
            max_relative = 1e-9
        );

        let outcome = warm.step(&DriveState::initial(), &Controls::new(rpm(2_000.0)));
        assert_eq!(outcome.state.vehicle.air_density, warm.air_density());
    }

    #[test]
    fn steps_are_replayable() {
        let dynamics = dynamics();
        let state = at_speed(12.0);
        let controls = Controls::from_scalars(5_000.0, 2.0, DrivingStyle::Normal, 0.8);

        let first = dynamics.step(&state, &controls);
        let second = dynamics.step(&state, &controls);
        assert_eq!(first, second);

        let input = DriveInput { state, controls };
        assert_eq!(dynamics.call(&input).unwrap(), first);
    }

    #[test]
    fn shifts_up_at_high_engine_speed() {
        let outcome = dynamics().step(&at_speed(20.0), &Controls::new(rpm(14_000.0)));
        assert_eq!(outcome.shift.direction, ShiftDirection::Up);
        assert_eq!(outcome.state.gear.index(), 1);
        assert_eq!(outcome.shift.ratio, 2.5);
    }

    #[test]
    fn rejects_invalid_vehicle() {
        let dynamics = dynamics();
        let result = VehicleDynamics::new(
            *dynamics.engine(),
            dynamics.transmission().clone(),
            dynamics
                .vehicle()
                .with_cargo_mass(Mass::new::<kilogram>(-10.0)),
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "cargo_mass",
                ..
            })
        ));
    }

    fn rpm(value: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(value)
    }
}
