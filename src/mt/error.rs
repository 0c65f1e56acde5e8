use std::time::Duration;

/// Error types for the machine translation layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MtError {
    /// Provider rejected or failed the request
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// Missing API key, bad credentials, client-side API errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failure
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Provider returned a different number of results than requested
    #[error("Expected {expected} translations, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Call did not finish in time
    #[error("Translation call timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for MtError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MtError::NetworkError(format!("Request timed out: {}", e))
        } else {
            MtError::NetworkError(e.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
