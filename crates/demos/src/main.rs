//! Drives a vehicle over a sample route and prints what happened.
//!
//! ```text
//! cargo run -p tractive-demos -- --steps 2000 --style eco
//! cargo run -p tractive-demos -- --config crates/demos/configs/default.toml --brake-from 1500
//! ```

mod cli;
mod route;

use std::error::Error;

use clap::Parser;
use tracing::{Level, info, warn};
use tractive_powertrain::{DriveInput, DriveSeries, DriveState, SimulationConfig, StepOutcome};
use tractive_solvers::transient::march::{self, Action, Event};

use crate::{
    cli::Cli,
    route::{Route, RouteProblem},
};

/// The car used when no configuration file is given.
const DEFAULT_CONFIG: &str = include_str!("../configs/default.toml");

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::from_toml_str(DEFAULT_CONFIG)?,
    };
    let dynamics = config.build()?;

    let route = Route {
        steps: cli.steps,
        start_rpm: cli.start_rpm,
        end_rpm: cli.end_rpm,
        style: cli.style,
    };
    let problem = RouteProblem {
        brake_from: cli.brake_from,
    };
    info!(steps = route.steps, style = %route.style, "driving route");

    println!(
        "{:>6} {:>10} {:>12} {:>12} {:>6}",
        "step", "v (m/s)", "x (m)", "a (m/s²)", "gear"
    );
    let every = cli.every;
    let solution = march::solve(
        &dynamics,
        &problem,
        DriveState::initial(),
        route.controls(),
        |event: &Event<DriveInput, StepOutcome>| -> Option<Action> {
            if every > 0 && event.step % every == 0 {
                let (velocity, position, acceleration, _, _) =
                    event.snapshot.output.report.as_tuple();
                println!(
                    "{:>6} {velocity:>10.3} {position:>12.3} {acceleration:>12.3} {:>6}",
                    event.step,
                    event.snapshot.output.state.gear.index() + 1,
                );
            }
            None
        },
    )?;

    let series = DriveSeries::from_history(&solution.history);
    let limited = solution
        .history
        .iter()
        .filter(|snapshot| snapshot.output.forces.traction_limited)
        .count();
    if limited > 0 {
        warn!(steps = limited, "net force derated by road surface");
    }

    println!();
    println!("steps          {}", solution.steps);
    println!("final gear     {}", solution.final_state.gear);
    println!("distance       {:.3} m", series.distance().unwrap_or(0.0));
    println!("top speed      {:.3} m/s", series.max_velocity().unwrap_or(0.0));
    println!("fuel           {:.6}", series.total_fuel());
    println!("regen          {:.6}", series.total_regen());

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to init logging. {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use tractive_powertrain::DrivingStyle;

    #[test]
    fn built_in_car_reproduces_first_step() {
        let dynamics = SimulationConfig::from_toml_str(DEFAULT_CONFIG)
            .unwrap()
            .build()
            .unwrap();
        let route = Route {
            steps: 2_000,
            start_rpm: 1_000.0,
            end_rpm: 6_000.0,
            style: DrivingStyle::Eco,
        };

        let solution = march::solve_unobserved(
            &dynamics,
            &RouteProblem::default(),
            DriveState::initial(),
            route.controls().into_iter().take(1),
        )
        .unwrap();

        let (velocity, position, acceleration, fuel, regen) =
            solution.history[0].output.report.as_tuple();
        assert_relative_eq!(velocity, 1.532535386610339, max_relative = 1e-9);
        assert_relative_eq!(position, 0.01532535386610339, max_relative = 1e-9);
        assert_relative_eq!(acceleration, 143.2535386610339, max_relative = 1e-9);
        assert_relative_eq!(fuel, 0.00017801975117292228, max_relative = 1e-9);
        assert_eq!(regen, 0.0);
    }
}
