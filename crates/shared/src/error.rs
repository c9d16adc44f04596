//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// None of these are fatal to a session: callers surface the message and
/// keep the current state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected at the edit boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code shown next to user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
