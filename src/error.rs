//! Typed failures for the experiment core.
//!
//! File-level problems (missing or malformed artifacts) stay `anyhow` errors
//! at the storage boundary; this enum covers the two failure classes the core
//! itself can produce.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperimentError {
    /// Generator parameters that cannot produce a valid assignment.
    /// Never clamped or retried.
    #[error("flag probability must be within [0.0, 1.0], got {0}")]
    InvalidFlagProbability(f64),

    #[error("marker id set must not be empty")]
    EmptyMarkerSet,

    /// Scoring was invoked on a response with unset required fields.
    /// No partial score is produced.
    #[error("response is incomplete: missing {0}")]
    IncompleteResponse(String),
}
