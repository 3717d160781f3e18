use std::path::PathBuf;

use clap::Parser;
use tractive_powertrain::DrivingStyle;

/// Drives a configured vehicle over a sample route and prints a summary.
///
/// The route ramps engine speed linearly over the run, climbs a 5° grade on a
/// wet road for steps 50 to 100, and descends a 5° grade on a loose surface for
/// steps 150 to 180.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML vehicle configuration. Uses the built-in car if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of time steps to simulate.
    #[arg(short, long, default_value_t = 2_000)]
    pub steps: usize,

    /// Driving style: eco, normal, or performance.
    #[arg(long, default_value = "eco")]
    pub style: DrivingStyle,

    /// Engine speed at the first step, in RPM.
    #[arg(long, default_value_t = 1_000.0)]
    pub start_rpm: f64,

    /// Engine speed at the last step, in RPM.
    #[arg(long, default_value_t = 6_000.0)]
    pub end_rpm: f64,

    /// Apply the brake from this step onward.
    #[arg(long)]
    pub brake_from: Option<usize>,

    /// Print one sample row every this many steps (0 disables).
    #[arg(long, default_value_t = 250)]
    pub every: usize,

    /// Log shifts and traction derates.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
