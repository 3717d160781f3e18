use std::path::PathBuf;

use thiserror::Error;
use tractive_core::constraint::{Constrained, Constraint, ConstraintError, Finite};

/// Errors raised while building models from configuration.
///
/// Stepping a configured model never fails; every invalid value is caught
/// here, once, at construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A scalar configuration value violates its numeric constraint.
    #[error("invalid `{field}`: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The transmission has no gears.
    #[error("transmission must have at least one gear")]
    NoGears,

    /// A gear ratio is zero, negative, NaN, or infinite.
    #[error("gear {gear} has an invalid ratio {ratio}")]
    InvalidGearRatio { gear: usize, ratio: f64 },

    /// The configuration file could not be read.
    #[error("failed to read config file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Checks `value` against the constraint `C` and then against [`Finite`],
/// naming `field` on failure.
pub(crate) fn check<T, C>(field: &'static str, value: T) -> Result<T, ConfigError>
where
    C: Constraint<T>,
    Finite: Constraint<T>,
{
    Constrained::<T, C>::new(value)
        .map(Constrained::into_inner)
        .and_then(|value| Constrained::<T, Finite>::new(value).map(Constrained::into_inner))
        .map_err(|source| ConfigError::Invalid { field, source })
}
