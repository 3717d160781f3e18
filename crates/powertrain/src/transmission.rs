//! Gear-shift state machine.
//!
//! The current gear is an explicit [`GearState`] value. Shifting is a pure
//! transition `(gear, rpm, max_rpm) → (gear', ratio)`, so whoever owns the
//! state decides when it moves forward.
//!
//! Shifts use two engine-speed thresholds:
//!
//! - above 85% of `max_rpm`, shift up one gear (unless already in top gear),
//! - below 30% of `max_rpm`, shift down one gear (unless already in first).
//!
//! Between the two thresholds the gear holds. There is no time-based debounce,
//! so an engine speed that oscillates across a threshold shifts on every call.

use std::{convert::Infallible, fmt};

use tractive_core::{Model, constraint::UnitIntervalLeftOpen};
use tracing::debug;
use uom::si::{
    angular_velocity::revolution_per_minute,
    f64::{AngularVelocity, Ratio},
    ratio::ratio,
};

use crate::error::{ConfigError, check};

/// Fraction of `max_rpm` above which the transmission shifts up.
pub const UPSHIFT_FRACTION: f64 = 0.85;

/// Fraction of `max_rpm` below which the transmission shifts down.
pub const DOWNSHIFT_FRACTION: f64 = 0.3;

/// Default transmission efficiency.
const DEFAULT_EFFICIENCY: f64 = 0.95;

/// Transmission configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TransmissionConfig {
    /// Gear ratios ordered from first gear to top gear.
    pub gear_ratios: Vec<f64>,
    pub efficiency: Ratio,
}

impl TransmissionConfig {
    /// Creates a configuration with the default efficiency of 0.95.
    #[must_use]
    pub fn new(gear_ratios: impl Into<Vec<f64>>) -> Self {
        Self {
            gear_ratios: gear_ratios.into(),
            efficiency: Ratio::new::<ratio>(DEFAULT_EFFICIENCY),
        }
    }

    /// Returns `self` with the given efficiency, keeping other fields unchanged.
    #[must_use]
    pub fn with_efficiency(self, efficiency: Ratio) -> Self {
        Self { efficiency, ..self }
    }
}

/// The currently engaged gear.
///
/// Only [`GearState::first`] and [`Transmission::shift`] produce values, so a
/// gear state obtained from a transmission always indexes one of its gears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GearState(usize);

impl GearState {
    /// First gear, the initial state of every transmission.
    #[must_use]
    pub const fn first() -> Self {
        Self(0)
    }

    /// Zero-based gear index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gear {}", self.0 + 1)
    }
}

/// Which way a call to [`Transmission::shift`] moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Up,
    Down,
    Hold,
}

/// The result of a shift decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shift {
    pub gear: GearState,
    pub ratio: f64,
    pub direction: ShiftDirection,
}

/// Input to the transmission when evaluated as a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftInput {
    pub gear: GearState,
    pub rpm: AngularVelocity,
    pub max_rpm: AngularVelocity,
}

/// A validated multi-gear transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    gear_ratios: Vec<f64>,
    efficiency: Ratio,
}

impl Transmission {
    /// Validates `config` and builds the transmission.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoGears`] if `gear_ratios` is empty.
    /// - [`ConfigError::InvalidGearRatio`] if a ratio is not finite and positive.
    /// - [`ConfigError::Invalid`] if `efficiency` lies outside `(0, 1]`.
    pub fn new(config: TransmissionConfig) -> Result<Self, ConfigError> {
        let TransmissionConfig {
            gear_ratios,
            efficiency,
        } = config;

        if gear_ratios.is_empty() {
            return Err(ConfigError::NoGears);
        }
        if let Some((index, &bad)) = gear_ratios
            .iter()
            .enumerate()
            .find(|(_, value)| !(value.is_finite() && **value > 0.0))
        {
            return Err(ConfigError::InvalidGearRatio {
                gear: index + 1,
                ratio: bad,
            });
        }
        let efficiency = check::<_, UnitIntervalLeftOpen>("transmission.efficiency", efficiency)?;

        debug!(gears = gear_ratios.len(), "transmission configured");
        Ok(Self {
            gear_ratios,
            efficiency,
        })
    }

    #[must_use]
    pub fn gear_ratios(&self) -> &[f64] {
        &self.gear_ratios
    }

    #[must_use]
    pub fn efficiency(&self) -> Ratio {
        self.efficiency
    }

    /// The highest gear.
    #[must_use]
    pub fn top_gear(&self) -> GearState {
        GearState(self.gear_ratios.len() - 1)
    }

    /// Ratio of `gear`, without shifting.
    ///
    /// A gear state from a transmission with more gears maps to this
    /// transmission's top gear.
    #[must_use]
    pub fn ratio(&self, gear: GearState) -> f64 {
        self.gear_ratios[self.clamp(gear).0]
    }

    /// Applies the shift thresholds once and returns the resulting gear.
    ///
    /// At most one gear change happens per call.
    #[must_use]
    pub fn shift(&self, gear: GearState, rpm: AngularVelocity, max_rpm: AngularVelocity) -> Shift {
        let current = self.clamp(gear);
        let rpm_value = rpm.get::<revolution_per_minute>();
        let max_rpm_value = max_rpm.get::<revolution_per_minute>();

        let (next, direction) = if rpm_value > max_rpm_value * UPSHIFT_FRACTION
            && current < self.top_gear()
        {
            (GearState(current.0 + 1), ShiftDirection::Up)
        } else if rpm_value < max_rpm_value * DOWNSHIFT_FRACTION && current > GearState::first() {
            (GearState(current.0 - 1), ShiftDirection::Down)
        } else {
            (current, ShiftDirection::Hold)
        };

        if direction != ShiftDirection::Hold {
            debug!(from = %current, to = %next, rpm = rpm_value, "shift");
        }

        Shift {
            gear: next,
            ratio: self.ratio(next),
            direction,
        }
    }

    fn clamp(&self, gear: GearState) -> GearState {
        gear.min(self.top_gear())
    }
}

impl Model for Transmission {
    type Input = ShiftInput;
    type Output = Shift;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.shift(input.gear, input.rpm, input.max_rpm))
    }
}
