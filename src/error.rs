//! Configuration errors.
//!
//! Everything that can go wrong *before* the search starts is reported
//! through [`ConfigError`]. Evaluation failures are not errors: an
//! [`Objective`](crate::objective::Objective) signals them by returning
//! `f64::INFINITY`, and the engines keep going.

use crate::space::SpecError;

/// Errors raised while building a search space or validating a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("parameter '{name}': {source}")]
    Parameter {
        name: String,
        #[source]
        source: SpecError,
    },

    #[error("invalid parameter: {0}")]
    Spec(#[from] SpecError),

    #[error("duplicate parameter '{0}'")]
    DuplicateParameter(String),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("search space has no parameters")]
    EmptySpace,

    #[error("candidate does not match the search space: {0}")]
    CandidateMismatch(String),

    #[error("population of {population} is smaller than tournament size {tournament}")]
    PopulationTooSmall { population: usize, tournament: usize },

    #[error("expected an initial population of {expected}, got {actual}")]
    PopulationSizeMismatch { expected: usize, actual: usize },

    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
