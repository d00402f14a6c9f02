use std::time::Duration;

use thiserror::Error;

/// Failure of the external structured-generation call.
///
/// Never retried here; retry/backoff policy belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(String),

    #[error("generation service rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("generated output violates schema: {0}")]
    SchemaViolation(String),

    #[error("generation service returned no output")]
    Empty,

    #[error("generation service is not configured")]
    NotConfigured,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    /// Rejected before any external call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
