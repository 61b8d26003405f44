use thiserror::Error;

/// Rejected indicator configuration.
///
/// Returned by config builders and [`Multiplier::try_new`] so that invalid
/// parameters fail at construction, never during evaluation.
///
/// [`Multiplier::try_new`]: crate::Multiplier::try_new
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("period is required")]
    MissingPeriod,

    #[error("{name} must be a finite positive number, got {value}")]
    InvalidMultiplier { name: &'static str, value: f64 },
}
