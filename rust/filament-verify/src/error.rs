//! Error taxonomy for the verification core.

use std::path::PathBuf;

/// Errors surfaced by prime evaluation, sampling, aggregation and matching.
#[derive(Debug, thiserror::Error)]
pub enum FilamentError {
    /// A value that is not prime was passed where a prime is required.
    #[error("{0} is not prime")]
    InvalidInput(u64),

    #[error("no primes in range [{start}, {end}]")]
    EmptyRange { start: u64, end: u64 },

    #[error("range start {start} exceeds end {end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("candidate list is empty")]
    EmptyCandidates,

    /// The reference transform produced a non-finite prediction.
    #[error("reference value {0} has no finite prediction")]
    InvalidReference(f64),

    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilamentError>;
