//! Error handling for TubeGrab

use thiserror::Error;

/// Main error type for the resolver service
///
/// Every failure is mapped exactly once to an HTTP status; there are no
/// internal retries.
#[derive(Debug, Error)]
pub enum TubeGrabError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to fetch video info")]
    Upstream { status: u16, details: String },

    #[error("{0}")]
    ResolutionFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TubeGrabError {
    /// HTTP status this error surfaces as
    pub fn status_code(&self) -> u16 {
        match self {
            TubeGrabError::Configuration(_) => 500,
            TubeGrabError::Validation(_) => 400,
            TubeGrabError::Upstream { status, .. } => *status,
            TubeGrabError::ResolutionFailed(_) => 404,
            TubeGrabError::NotFound(_) => 404,
            TubeGrabError::Network(_) => 500,
            TubeGrabError::Serialization(_) => 500,
        }
    }
}
