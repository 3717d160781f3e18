//! Engine torque curve.
//!
//! The engine is a pure function of speed. Torque follows a triangular curve
//! that rises linearly from zero to `max_torque` at half of `max_rpm`, then
//! falls linearly back to zero at `max_rpm`:
//!
//! ```text
//! torque
//!   ^        /\
//!   |       /  \
//!   |      /    \
//!   +-----+------+----> rpm
//!   0    peak   max
//! ```
//!
//! Power is derived from torque with the usual N·m·RPM → kW constant, and an
//! efficiency factor derates the output slightly at high speed.

use std::convert::Infallible;

use tractive_core::{
    Model,
    constraint::{NonNegative, StrictlyPositive, UnitIntervalLeftOpen},
};
use tracing::debug;
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Power, Ratio, Torque},
    power::kilowatt,
    ratio::ratio,
    torque::newton_meter,
};

use crate::error::{ConfigError, check};

/// Fraction of `max_rpm` at which torque peaks.
const PEAK_FRACTION: f64 = 0.5;

/// Converts `N·m × RPM` to kW.
const NM_RPM_PER_KW: f64 = 9548.8;

/// Efficiency lost between zero speed and `max_rpm`.
const EFFICIENCY_DROP: f64 = 0.001;

/// Efficiency never falls below this value.
const MIN_EFFICIENCY: f64 = 0.6;

/// Default base efficiency.
const DEFAULT_EFFICIENCY: f64 = 0.85;

/// Engine configuration.
///
/// `max_power` is informational only; the torque curve is defined by
/// `max_torque` and `max_rpm` alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub max_torque: Torque,
    pub max_power: Power,
    pub max_rpm: AngularVelocity,
    pub base_efficiency: Ratio,
}

impl EngineConfig {
    /// Creates a configuration with the default base efficiency of 0.85.
    #[must_use]
    pub fn new(max_torque: Torque, max_power: Power, max_rpm: AngularVelocity) -> Self {
        Self {
            max_torque,
            max_power,
            max_rpm,
            base_efficiency: Ratio::new::<ratio>(DEFAULT_EFFICIENCY),
        }
    }

    /// Returns `self` with the given base efficiency, keeping other fields unchanged.
    #[must_use]
    pub fn with_base_efficiency(self, base_efficiency: Ratio) -> Self {
        Self {
            base_efficiency,
            ..self
        }
    }
}

/// Torque, power, and efficiency at one engine speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub torque: Torque,
    pub power: Power,
    pub efficiency: Ratio,
}

/// A validated engine.
///
/// # Example
///
/// ```
/// use tractive_powertrain::engine::{Engine, EngineConfig};
/// use uom::si::{
///     angular_velocity::revolution_per_minute,
///     f64::{AngularVelocity, Power, Torque},
///     power::kilowatt,
///     torque::newton_meter,
/// };
///
/// let engine = Engine::new(EngineConfig::new(
///     Torque::new::<newton_meter>(800.0),
///     Power::new::<kilowatt>(800.0),
///     AngularVelocity::new::<revolution_per_minute>(16_000.0),
/// ))
/// .unwrap();
///
/// let peak = engine.torque(AngularVelocity::new::<revolution_per_minute>(8_000.0));
/// assert!((peak.get::<newton_meter>() - 800.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Validates `config` and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `max_torque` or `max_rpm` is not
    /// strictly positive, `max_power` is negative, or `base_efficiency` lies
    /// outside `(0, 1]`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        check::<_, StrictlyPositive>("max_torque", config.max_torque)?;
        check::<_, NonNegative>("max_power", config.max_power)?;
        check::<_, StrictlyPositive>("max_rpm", config.max_rpm)?;
        check::<_, UnitIntervalLeftOpen>("base_efficiency", config.base_efficiency)?;

        debug!(
            max_torque_nm = config.max_torque.get::<newton_meter>(),
            max_rpm = config.max_rpm.get::<revolution_per_minute>(),
            "engine configured"
        );
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn max_rpm(&self) -> AngularVelocity {
        self.config.max_rpm
    }

    /// Torque available at `rpm`.
    ///
    /// Zero when the engine is stopped, turning backwards, or over `max_rpm`.
    #[must_use]
    pub fn torque(&self, rpm: AngularVelocity) -> Torque {
        let rpm = rpm.get::<revolution_per_minute>();
        let max_rpm = self.config.max_rpm.get::<revolution_per_minute>();
        let max_torque = self.config.max_torque.get::<newton_meter>();

        if rpm <= 0.0 || rpm > max_rpm {
            return Torque::new::<newton_meter>(0.0);
        }

        let peak_rpm = max_rpm * PEAK_FRACTION;
        let torque = if rpm <= peak_rpm {
            max_torque * (rpm / peak_rpm)
        } else {
            max_torque * (1.0 - (rpm - peak_rpm) / (max_rpm - peak_rpm))
        };
        Torque::new::<newton_meter>(torque)
    }

    /// Shaft power at `rpm`.
    #[must_use]
    pub fn power(&self, rpm: AngularVelocity) -> Power {
        let torque = self.torque(rpm).get::<newton_meter>();
        let rpm = rpm.get::<revolution_per_minute>();
        Power::new::<kilowatt>(torque * rpm / NM_RPM_PER_KW)
    }

    /// Efficiency derating at `rpm`, never below 0.6.
    #[must_use]
    pub fn efficiency_factor(&self, rpm: AngularVelocity) -> Ratio {
        let base = self.config.base_efficiency.get::<ratio>();
        let fraction = rpm.get::<revolution_per_minute>()
            / self.config.max_rpm.get::<revolution_per_minute>();
        Ratio::new::<ratio>((base - EFFICIENCY_DROP * fraction).max(MIN_EFFICIENCY))
    }

    /// Evaluates torque, power, and efficiency together.
    #[must_use]
    pub fn operating_point(&self, rpm: AngularVelocity) -> OperatingPoint {
        OperatingPoint {
            torque: self.torque(rpm),
            power: self.power(rpm),
            efficiency: self.efficiency_factor(rpm),
        }
    }
}

impl Model for Engine {
    type Input = AngularVelocity;
    type Output = OperatingPoint;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.operating_point(*input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use tractive_core::constraint::ConstraintError;

    fn rpm(value: f64) -> AngularVelocity {
        AngularVelocity::new::<revolution_per_minute>(value)
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::new(
            Torque::new::<newton_meter>(800.0),
            Power::new::<kilowatt>(800.0),
            rpm(16_000.0),
        ))
        .unwrap()
    }

    fn torque_at(engine: &Engine, value: f64) -> f64 {
        engine.torque(rpm(value)).get::<newton_meter>()
    }

    #[test]
    fn torque_is_zero_outside_operating_range() {
        let engine = engine();
        assert_eq!(torque_at(&engine, 0.0), 0.0);
        assert_eq!(torque_at(&engine, -500.0), 0.0);
        assert_eq!(torque_at(&engine, 16_000.1), 0.0);
        assert_eq!(torque_at(&engine, 40_000.0), 0.0);
    }

    #[test]
    fn torque_follows_triangular_curve() {
        let engine = engine();
        assert_relative_eq!(torque_at(&engine, 4_000.0), 400.0, epsilon = 1e-9);
        assert_relative_eq!(torque_at(&engine, 8_000.0), 800.0, epsilon = 1e-9);
        assert_relative_eq!(torque_at(&engine, 12_000.0), 400.0, epsilon = 1e-9);
        assert_relative_eq!(torque_at(&engine, 16_000.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn torque_peaks_at_half_of_max_rpm() {
        for (max_torque, max_rpm) in [(120.0, 6_000.0), (350.0, 7_200.0), (800.0, 16_000.0)] {
            let engine = Engine::new(EngineConfig::new(
                Torque::new::<newton_meter>(max_torque),
                Power::new::<kilowatt>(0.0),
                rpm(max_rpm),
            ))
            .unwrap();
            assert_relative_eq!(
                torque_at(&engine, max_rpm * 0.5),
                max_torque,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn power_uses_torque_speed_product() {
        let engine = engine();
        // 100 N·m at 1000 RPM.
        let power = engine.power(rpm(1_000.0)).get::<kilowatt>();
        assert_relative_eq!(power, 100.0 * 1_000.0 / 9548.8, max_relative = 1e-12);

        assert_eq!(engine.power(rpm(0.0)).get::<kilowatt>(), 0.0);
    }

    #[test]
    fn efficiency_is_non_increasing_and_floored() {
        let engine = engine();
        let mut previous = f64::INFINITY;
        for step in 0..=200 {
            let efficiency = engine
                .efficiency_factor(rpm(f64::from(step) * 100.0))
                .get::<ratio>();
            assert!(efficiency <= previous);
            assert!(efficiency >= MIN_EFFICIENCY);
            previous = efficiency;
        }
        assert_relative_eq!(previous, 0.85 - 0.001 * 1.25, epsilon = 1e-12);
    }

    #[test]
    fn efficiency_floor_applies_to_low_base_efficiency() {
        let engine = Engine::new(
            EngineConfig::new(
                Torque::new::<newton_meter>(200.0),
                Power::new::<kilowatt>(90.0),
                rpm(6_000.0),
            )
            .with_base_efficiency(Ratio::new::<ratio>(0.6)),
        )
        .unwrap();

        let efficiency = engine.efficiency_factor(rpm(6_000.0)).get::<ratio>();
        assert_relative_eq!(efficiency, 0.6);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let engine = engine();
        let first = engine.call(&rpm(3_250.0)).unwrap();
        for _ in 0..3 {
            assert_eq!(engine.call(&rpm(3_250.0)).unwrap(), first);
        }
    }

    #[test]
    fn rejects_invalid_configuration() {
        let valid = engine().config;

        let err = Engine::new(EngineConfig {
            max_rpm: rpm(0.0),
            ..valid
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_rpm",
                source: ConstraintError::Zero
            }
        ));

        let err = Engine::new(EngineConfig {
            max_torque: Torque::new::<newton_meter>(-1.0),
            ..valid
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_torque", .. }));

        let err = Engine::new(valid.with_base_efficiency(Ratio::new::<ratio>(1.2))).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "base_efficiency",
                source: ConstraintError::AboveMaximum
            }
        ));
    }

    #[test]
    fn rejects_infinite_limits() {
        let valid = engine().config;
        let cases = [
            (
                "max_torque",
                EngineConfig {
                    max_torque: Torque::new::<newton_meter>(f64::INFINITY),
                    ..valid
                },
            ),
            (
                "max_power",
                EngineConfig {
                    max_power: Power::new::<kilowatt>(f64::INFINITY),
                    ..valid
                },
            ),
            (
                "max_rpm",
                EngineConfig {
                    max_rpm: rpm(f64::INFINITY),
                    ..valid
                },
            ),
        ];

        for (name, config) in cases {
            match Engine::new(config) {
                Err(ConfigError::Invalid { field, source }) => {
                    assert_eq!(field, name);
                    assert_eq!(source, ConstraintError::NotFinite, "{name}");
                }
                other => panic!("{name}: expected a non-finite error, got {other:?}"),
            }
        }
    }
}
