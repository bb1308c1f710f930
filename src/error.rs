//! Error types for Pipo Coach

use thiserror::Error;

/// Errors that can occur while generating coaching artifacts.
///
/// The taxonomy drives recovery: `Upstream` and `Extraction` are absorbed at
/// the orchestrator boundary and replaced with fallback output; `Configuration`
/// indicates a deployment defect and always surfaces to the caller.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream generator error: {0}")]
    Upstream(String),

    #[error("Response extraction error: {0}")]
    Extraction(String),
}

impl CoachError {
    /// Whether an orchestrator may substitute fallback output for this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CoachError::Configuration(_))
    }
}

// Transport failures are upstream-generator failures, never fatal.
impl From<reqwest::Error> for CoachError {
    fn from(e: reqwest::Error) -> Self {
        CoachError::Upstream(e.to_string())
    }
}

// Parse failures only ever happen while recovering generator output.
impl From<serde_json::Error> for CoachError {
    fn from(e: serde_json::Error) -> Self {
        CoachError::Extraction(e.to_string())
    }
}
