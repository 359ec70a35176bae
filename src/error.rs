/// Error types for the meeting planner
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// LLM provider failure (non-2xx response, timeout, malformed body).
    /// Carries the upstream HTTP status when one was received so the server
    /// boundary can propagate it.
    #[error("Provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    #[error("Unsupported generation kind: {0}")]
    InvalidKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Create a provider error without an associated HTTP status
    pub fn provider(message: impl Into<String>) -> Self {
        AppError::Provider {
            status: None,
            message: message.into(),
        }
    }

    /// The upstream HTTP status for provider failures, if one was received
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            AppError::Provider { status, .. } => *status,
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
