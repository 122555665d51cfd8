//! Error types for the calculation engine

use thiserror::Error;

/// Errors surfaced by the engine to its callers
///
/// Remote estimator failures are recovered inside the gateway and never
/// reach this type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A precondition on caller-supplied input was violated
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Simulation duration was zero or negative
    #[error("simulation duration must be greater than zero")]
    InvalidDuration,

    /// Configuration could not be interpreted
    #[error("configuration error: {0}")]
    Config(String),

    /// The record store rejected or could not complete an operation
    #[error("record store error: {0}")]
    Store(String),

    /// The portfolio session was closed (sign-out)
    #[error("portfolio session is closed")]
    SessionClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, EngineError>;
