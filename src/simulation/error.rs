//! Errors raised while configuring a colony.
//!
//! Ticking a valid population never fails; everything here is surfaced at
//! construction or while reading parameter files.

use thiserror::Error;

/// Errors that can occur when building a population or loading its parameters.
#[derive(Debug, Error)]
pub enum PopulationError {
    /// A parameter is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The initial colony does not fit under the ceiling.
    #[error("initial population {initial} exceeds the ceiling of {max}")]
    InitialExceedsCeiling {
        /// Requested number of founding mice.
        initial: usize,
        /// Configured population ceiling.
        max: usize,
    },
    /// Reading or writing a parameter file failed.
    #[error("parameter file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A parameter file could not be (de)serialized.
    #[error("malformed parameter file: {0}")]
    Json(#[from] serde_json::Error),
}
