//! Error types for the cohort collaborator layer.

use thiserror::Error;

/// Errors raised at the boundary between the engine and its collaborators.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Resolver returned a major that cannot become a student's current major
    #[error("Invalid major from resolver: {0:?}")]
    InvalidMajor(String),
    
    /// Sampler returned a different number of values than requested
    #[error("Distribution arity mismatch for {kind}: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Which metric was being sampled
        kind: String,
        /// Number of values requested
        expected: usize,
        /// Number of values returned
        actual: usize,
    },
    
    /// History sink failed to persist the table
    #[error("History sink error: {0}")]
    SinkError(String),
}

impl EnvError {
    /// Creates an invalid-major error.
    pub fn invalid_major(major: impl Into<String>) -> Self {
        Self::InvalidMajor(major.into())
    }
    
    /// Creates an arity-mismatch error.
    pub fn arity(kind: impl std::fmt::Display, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            kind: kind.to_string(),
            expected,
            actual,
        }
    }
    
    /// Creates a sink error.
    pub fn sink(msg: impl std::fmt::Display) -> Self {
        Self::SinkError(msg.to_string())
    }
}
