use tractive_core::Snapshot;
use uom::si::{
    acceleration::meter_per_second_squared, length::meter, velocity::meter_per_second,
};

use crate::dynamics::{DriveInput, StepOutcome, StepReport};

/// Per-step outputs of a run as parallel series, in SI units.
///
/// This is the shape a reporting or plotting collaborator consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveSeries {
    pub velocities: Vec<f64>,
    pub positions: Vec<f64>,
    pub accelerations: Vec<f64>,
    pub fuel_consumptions: Vec<f64>,
    pub regen_energies: Vec<f64>,
}

impl DriveSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the report of every recorded step.
    #[must_use]
    pub fn from_history(history: &[Snapshot<DriveInput, StepOutcome>]) -> Self {
        history
            .iter()
            .map(|snapshot| snapshot.output.report)
            .collect()
    }

    pub fn push(&mut self, report: &StepReport) {
        self.velocities
            .push(report.velocity.get::<meter_per_second>());
        self.positions.push(report.position.get::<meter>());
        self.accelerations
            .push(report.acceleration.get::<meter_per_second_squared>());
        self.fuel_consumptions.push(report.fuel_consumption);
        self.regen_energies.push(report.regen_energy);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    #[must_use]
    pub fn total_fuel(&self) -> f64 {
        self.fuel_consumptions.iter().sum()
    }

    #[must_use]
    pub fn total_regen(&self) -> f64 {
        self.regen_energies.iter().sum()
    }

    /// Highest velocity reached, or `None` for an empty series.
    #[must_use]
    pub fn max_velocity(&self) -> Option<f64> {
        self.velocities.iter().copied().reduce(f64::max)
    }

    /// Final position, or `None` for an empty series.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        self.positions.last().copied()
    }
}

impl FromIterator<StepReport> for DriveSeries {
    fn from_iter<I: IntoIterator<Item = StepReport>>(iter: I) -> Self {
        let mut series = Self::new();
        series.extend(iter);
        series
    }
}

impl Extend<StepReport> for DriveSeries {
    fn extend<I: IntoIterator<Item = StepReport>>(&mut self, iter: I) {
        for report in iter {
            self.push(&report);
        }
    }
}
