use std::convert::Infallible;

use tractive_core::MarchProblem;
use tractive_powertrain::{Controls, DriveInput, DriveState, DrivingStyle, StepOutcome};

/// Friction of the dry road between segments.
const DRY_ROAD: f64 = 0.9;

/// A sloped stretch of road, by inclusive step range.
struct Segment {
    first: usize,
    last: usize,
    slope_degrees: f64,
    road_surface: f64,
}

const SEGMENTS: [Segment; 2] = [
    Segment {
        first: 50,
        last: 100,
        slope_degrees: 5.0,
        road_surface: 0.6,
    },
    Segment {
        first: 150,
        last: 180,
        slope_degrees: -5.0,
        road_surface: 0.5,
    },
];

/// An engine-speed ramp over a fixed road profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub steps: usize,
    pub start_rpm: f64,
    pub end_rpm: f64,
    pub style: DrivingStyle,
}

/// One step of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub controls: Controls,
}

impl Route {
    /// Controls for every step, with engine speed spaced evenly from start to end.
    #[must_use]
    pub fn controls(&self) -> Vec<RouteStep> {
        (0..self.steps)
            .map(|index| RouteStep {
                index,
                controls: self.controls_at(index),
            })
            .collect()
    }

    fn controls_at(&self, index: usize) -> Controls {
        let rpm = if self.steps > 1 {
            self.start_rpm
                + (self.end_rpm - self.start_rpm) * index as f64 / (self.steps - 1) as f64
        } else {
            self.start_rpm
        };

        let (slope, road_surface) = SEGMENTS
            .iter()
            .find(|segment| (segment.first..=segment.last).contains(&index))
            .map_or((0.0, DRY_ROAD), |segment| {
                (segment.slope_degrees, segment.road_surface)
            });

        Controls::from_scalars(rpm, slope, self.style, road_surface)
    }
}

/// Marches a route, applying the brake from a given step onward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteProblem {
    pub brake_from: Option<usize>,
}

impl MarchProblem for RouteProblem {
    type Input = DriveInput;
    type Output = StepOutcome;
    type State = DriveState;
    type Control = RouteStep;
    type Error = Infallible;

    fn build_input(
        &self,
        state: &DriveState,
        step: RouteStep,
    ) -> Result<DriveInput, Infallible> {
        let mut state = *state;
        state.vehicle.is_braking = self.brake_from.is_some_and(|first| step.index >= first);
        Ok(DriveInput {
            state,
            controls: step.controls,
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
    use uom::si::{angle::degree, angular_velocity::revolution_per_minute};

    fn route(steps: usize) -> Route {
        Route {
            steps,
            start_rpm: 1_000.0,
            end_rpm: 6_000.0,
            style: DrivingStyle::Eco,
        }
    }

    fn rpm(step: &RouteStep) -> f64 {
        step.controls.rpm.get::<revolution_per_minute>()
    }

    #[test]
    fn engine_speed_ramps_between_endpoints() {
        let controls = route(2_000).controls();
        assert_eq!(controls.len(), 2_000);
        assert_relative_eq!(rpm(&controls[0]), 1_000.0, max_relative = 1e-12);
        assert_relative_eq!(rpm(&controls[1_999]), 6_000.0, max_relative = 1e-12);
        assert!(controls.windows(2).all(|pair| rpm(&pair[1]) > rpm(&pair[0])));
    }

    #[test]
    fn single_step_route_uses_start_speed() {
        let controls = route(1).controls();
        assert_relative_eq!(rpm(&controls[0]), 1_000.0, max_relative = 1e-12);
    }

    #[test]
    fn segments_are_inclusive() {
        let controls = route(300).controls();
        let slope = |index: usize| controls[index].controls.slope.get::<degree>();
        let surface = |index: usize| controls[index].controls.road_surface;

        assert_eq!(slope(49), 0.0);
        assert_eq!(surface(49), 0.9);
        assert_relative_eq!(slope(50), 5.0, max_relative = 1e-12);
        assert_relative_eq!(slope(100), 5.0, max_relative = 1e-12);
        assert_eq!(surface(100), 0.6);
        assert_eq!(slope(101), 0.0);
        assert_relative_eq!(slope(150), -5.0, max_relative = 1e-12);
        assert_eq!(surface(180), 0.5);
        assert_eq!(surface(181), 0.9);
    }

    #[test]
    fn brake_applies_from_the_given_step() {
        let problem = RouteProblem {
            brake_from: Some(10),
        };
        let controls = route(20).controls();
        let state = DriveState::initial();

        let before = problem.build_input(&state, controls[9]).unwrap();
        let after = problem.build_input(&state, controls[10]).unwrap();
        assert!(!before.state.vehicle.is_braking);
        assert!(after.state.vehicle.is_braking);

        let never = RouteProblem::default()
            .build_input(&state, controls[19])
            .unwrap();
        assert!(!never.state.vehicle.is_braking);
    }
}
