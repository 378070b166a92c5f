//! Error types for the translation client

use thiserror::Error;

/// Phrase the upstream service puts in its abuse-detection page.
pub const RATE_LIMIT_PHRASE: &str =
    "Our systems have detected unusual traffic from your computer network.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtError {
    /// Source or destination language failed every lookup table
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),
    /// Upstream abuse detection kicked in; callers should back off
    #[error("Rate limited: the service reported unusual traffic from this network")]
    RateLimited,
    /// Non-2xx status with `raise_exception` enabled
    #[error("Unexpected status code \"{status}\" from {hosts:?}")]
    UnexpectedStatus { status: u16, hosts: Vec<String> },
    /// The response did not have the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// Connection, TLS, proxy, timeout or closed-session failures
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MtError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        MtError::MalformedResponse(msg.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, MtError::RateLimited)
    }
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::NetworkError(format!("request timed out: {}", err))
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
