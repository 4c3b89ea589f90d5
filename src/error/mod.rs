use thiserror::Error;

/// Error types for the Flora library.
///
/// Every failure in the analysis and advice pipeline is returned as one of
/// these values rather than raised. Callers that only care about the broad
/// category can use [`FloraError::kind`].
///
/// # Examples
///
/// ```
/// use flora::{FailureKind, FloraError, Result};
///
/// fn parse_reply(text: &str) -> Result<serde_json::Value> {
///     if text.trim().is_empty() {
///         return Err(FloraError::EmptyResponse("no text in reply".into()));
///     }
///     serde_json::from_str(text).map_err(|e| FloraError::SchemaViolation(e.to_string()))
/// }
///
/// let err = parse_reply("{ not json").unwrap_err();
/// assert_eq!(err.kind(), FailureKind::SchemaViolation);
/// ```
#[derive(Error, Debug)]
pub enum FloraError {
    /// The provider answered with a non-success status
    #[error("API error: {0}")]
    ApiError(String),

    /// The provider returned no usable text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Text was returned but it does not match the expected JSON shape
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Input rejected at the caller boundary (blank question, bad media)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Missing or invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Operation timed out
    #[error("Timeout error")]
    Timeout,

    /// HTTP client error (from reqwest)
    #[cfg(feature = "gemini")]
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error (from serde_json)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Broad failure categories surfaced by the analysis and advice calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network or provider error
    TransportFailure,
    /// The provider returned no text
    EmptyResponse,
    /// Text was present but not parseable as the expected shape
    SchemaViolation,
    /// The request never left the caller
    InvalidInput,
}

impl FloraError {
    /// Collapse the error into its failure category.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ApiError(_) | Self::Timeout => FailureKind::TransportFailure,
            #[cfg(feature = "gemini")]
            Self::HttpError(_) => FailureKind::TransportFailure,
            Self::EmptyResponse(_) => FailureKind::EmptyResponse,
            Self::SchemaViolation(_) | Self::JsonError(_) => FailureKind::SchemaViolation,
            Self::ValidationError(_) | Self::ConfigError(_) => FailureKind::InvalidInput,
        }
    }
}

// HttpError and JsonError compare unequal: their sources don't implement PartialEq
impl PartialEq for FloraError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ApiError(a), Self::ApiError(b)) => a == b,
            (Self::EmptyResponse(a), Self::EmptyResponse(b)) => a == b,
            (Self::SchemaViolation(a), Self::SchemaViolation(b)) => a == b,
            (Self::ValidationError(a), Self::ValidationError(b)) => a == b,
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::Timeout, Self::Timeout) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for Flora operations.
pub type Result<T> = std::result::Result<T, FloraError>;
