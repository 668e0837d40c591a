//! Error taxonomy for the detection pipeline.

use thiserror::Error;

/// Errors surfaced by the detection pipeline.
///
/// Only [`DetectionError::MalformedInput`] and [`DetectionError::ResourceExhausted`]
/// map to caller 4xx responses; [`DetectionError::InvariantViolation`] is a
/// programmer error and maps to a 5xx with a structured log entry. Detector
/// timeouts and caps are not represented here — they are recovered locally
/// and surfaced only through `Summary` flags.
#[derive(Error, Debug, Clone)]
pub enum DetectionError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("input exceeds resource limit: {0}")]
    ResourceExhausted(String),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, DetectionError>;
