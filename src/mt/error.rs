use thiserror::Error;

/// Error types for the machine translation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Locale code is empty or contains characters outside `[A-Za-z0-9_-]`
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// Provider could not be configured (bad endpoint, client build failure, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport-level failure: DNS, connection refused, TLS, ...
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Request did not complete within the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// The provider answered but reported a failure (HTTP or `responseStatus`)
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// The response body was not the JSON shape we expect
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl MtError {
    /// Whether this failure should be shown to the user as an inline message.
    ///
    /// Malformed responses are rendered as an empty translation instead.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, MtError::MalformedResponse(_))
    }
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::Timeout(err.to_string())
        } else if err.is_decode() {
            MtError::MalformedResponse(err.to_string())
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for MtError {
    fn from(err: serde_json::Error) -> Self {
        MtError::MalformedResponse(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
