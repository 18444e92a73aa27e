//! Error types for the cohort simulation.

use cohort_core::GridError;
use cohort_env::EnvError;
use thiserror::Error;

/// Errors that abort a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Construction parameters or collaborator config are out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    
    /// A collaborator broke its contract (bad major, wrong sample count, sink failure)
    #[error(transparent)]
    Env(#[from] EnvError),
    
    /// Students could not be placed
    #[error("Placement error: {0}")]
    Grid(#[from] GridError),
    
    /// Reading config or writing exports failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    /// JSON config or summary could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    
    /// A previous step failed; the model cannot continue
    #[error("Simulation halted after an earlier error")]
    Halted,
}

impl SimError {
    /// Creates a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
