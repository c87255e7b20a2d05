//! Error types for the planning core.

use thiserror::Error;

/// Errors that can occur when talking to the planning store or loading config.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not reach the planning API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Planning API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Planning API request timed out after {0}s")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Invalid event: {0}")]
    Validation(String),
}

/// Result type alias for planning operations.
pub type PlanningResult<T> = Result<T, PlanningError>;
