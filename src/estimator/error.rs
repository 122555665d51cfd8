//! Remote estimator error types
//!
//! These never leave the gateway: every variant triggers the local fallback.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimatorError {
    /// No API key configured for the remote service
    #[error("missing API key (expected in ${0})")]
    MissingApiKey(String),

    /// Network or TLS failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("remote service returned status {0}")]
    Status(u16),

    /// Service answered without any text
    #[error("remote service returned no text")]
    EmptyResponse,

    /// Text could not be interpreted as an estimate
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl EstimatorError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
