use std::{convert::Infallible, fmt, str::FromStr};

use serde::Deserialize;
use uom::si::{
    angle::degree,
    angular_velocity::revolution_per_minute,
    f64::{Angle, AngularVelocity},
};

/// Default road-surface friction coefficient (dry asphalt).
const DEFAULT_ROAD_SURFACE: f64 = 0.9;

/// How aggressively the driver uses the available power.
///
/// Each style scales engine power by a fixed multiplier:
///
/// | style         | multiplier |
/// |---------------|------------|
/// | `Eco`         | 0.8        |
/// | `Normal`      | 1.0        |
/// | `Performance` | 1.2        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DrivingStyle {
    Eco,
    Normal,
    Performance,
}

impl DrivingStyle {
    #[must_use]
    pub fn power_multiplier(self) -> f64 {
        match self {
            Self::Eco => 0.8,
            Self::Normal => 1.0,
            Self::Performance => 1.2,
        }
    }
}

/// Parses `eco` and `performance` (ignoring ASCII case); anything else is `Normal`.
impl From<&str> for DrivingStyle {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("eco") {
            Self::Eco
        } else if tag.eq_ignore_ascii_case("performance") {
            Self::Performance
        } else {
            Self::Normal
        }
    }
}

impl From<String> for DrivingStyle {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl FromStr for DrivingStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DrivingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eco => "eco",
            Self::Normal => "normal",
            Self::Performance => "performance",
        })
    }
}

/// Per-step inputs supplied by whoever drives the simulation.
///
/// `road_surface` is the tire-road friction coefficient, expected in `(0, 1]`.
/// It is not validated: the step uses whatever value it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub rpm: AngularVelocity,
    pub slope: Angle,
    pub style: DrivingStyle,
    pub road_surface: f64,
}

impl Controls {
    /// Controls for a flat, dry road in eco mode at the given engine speed.
    #[must_use]
    pub fn new(rpm: AngularVelocity) -> Self {
        Self {
            rpm,
            slope: Angle::new::<degree>(0.0),
            style: DrivingStyle::Eco,
            road_surface: DEFAULT_ROAD_SURFACE,
        }
    }

    /// Builds controls from plain scalars: RPM, slope in degrees, style, and friction.
    #[must_use]
    pub fn from_scalars(rpm: f64, slope_degrees: f64, style: DrivingStyle, road_surface: f64) -> Self {
        Self {
            rpm: AngularVelocity::new::<revolution_per_minute>(rpm),
            slope: Angle::new::<degree>(slope_degrees),
            style,
            road_surface,
        }
    }

    /// Returns `self` with the given slope, keeping other fields unchanged.
    #[must_use]
    pub fn with_slope(self, slope: Angle) -> Self {
        Self { slope, ..self }
    }

    /// Returns `self` with the given driving style, keeping other fields unchanged.
    #[must_use]
    pub fn with_style(self, style: DrivingStyle) -> Self {
        Self { style, ..self }
    }

    /// Returns `self` with the given road surface, keeping other fields unchanged.
    #[must_use]
    pub fn with_road_surface(self, road_surface: f64) -> Self {
        Self {
            road_surface,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!(DrivingStyle::from("eco"), DrivingStyle::Eco);
        assert_eq!(DrivingStyle::from("Performance"), DrivingStyle::Performance);
        assert_eq!("ECO".parse::<DrivingStyle>(), Ok(DrivingStyle::Eco));
    }

    #[test]
    fn unknown_tags_are_normal() {
        for tag in ["", "normal", "sport", "comfort", "eco-plus"] {
            assert_eq!(DrivingStyle::from(tag), DrivingStyle::Normal, "{tag}");
        }
    }

    #[test]
    fn multiplier_table() {
        assert_eq!(DrivingStyle::Eco.power_multiplier(), 0.8);
        assert_eq!(DrivingStyle::Normal.power_multiplier(), 1.0);
        assert_eq!(DrivingStyle::Performance.power_multiplier(), 1.2);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for style in [DrivingStyle::Eco, DrivingStyle::Normal, DrivingStyle::Performance] {
            assert_eq!(DrivingStyle::from(style.to_string().as_str()), style);
        }
    }

    #[test]
    fn deserializes_leniently() {
        #[derive(Deserialize)]
        struct Driver {
            style: DrivingStyle,
        }

        let driver: Driver = toml::from_str(r#"style = "Performance""#).unwrap();
        assert_eq!(driver.style, DrivingStyle::Performance);

        let driver: Driver = toml::from_str(r#"style = "sporty""#).unwrap();
        assert_eq!(driver.style, DrivingStyle::Normal);
    }

    #[test]
    fn defaults_match_a_dry_flat_road() {
        let controls = Controls::new(AngularVelocity::new::<revolution_per_minute>(2_000.0));
        assert_eq!(controls.slope.get::<degree>(), 0.0);
        assert_eq!(controls.style, DrivingStyle::Eco);
        assert_eq!(controls.road_surface, 0.9);
    }
}
