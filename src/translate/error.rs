//! Translation provider failures.
//!
//! None of these reach callers of the client: each one is turned into a
//! fallback outcome carrying the original text.

use std::time::Duration;

/// Why a single translation request failed.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The request did not finish within the configured bound.
    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("translation service returned status {0}")]
    Status(u16),
    /// The body was not valid JSON.
    #[error("invalid JSON from translation service: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON did not have the expected segment layout.
    #[error("malformed translation response: {0}")]
    Malformed(String),
}

/// Short classification of a fallback, kept on the outcome for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Request exceeded the timeout.
    Timeout,
    /// Transport failure.
    Network,
    /// Non-success HTTP status.
    Status,
    /// Response body did not have the expected shape.
    Malformed,
}

impl From<&TranslateError> for FallbackReason {
    fn from(err: &TranslateError) -> Self {
        match err {
            TranslateError::Timeout(_) => Self::Timeout,
            TranslateError::Network(_) => Self::Network,
            TranslateError::Status(_) => Self::Status,
            TranslateError::Json(_) | TranslateError::Malformed(_) => Self::Malformed,
        }
    }
}
