//! Error types for algebra traits.
//!
//! These errors are used by the algebra layer and are intentionally
//! domain-specific rather than generic. None of them ever reaches a client:
//! the orchestrator logs them and reports a fixed alert instead.

use std::fmt;

/// Error that can occur while fetching a content item's body.
///
/// This is the error type for [`ContentFetcher`](super::ContentFetcher).
/// A mix degrades a failed item to empty text; it never aborts on one.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The item carries neither `infoLink` nor `link`.
    MissingUrl { title: String },

    /// The URL could not be parsed or uses an unsupported scheme.
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status.
    HttpStatus { url: String, status: u16 },

    /// Network or transport error.
    Transport { message: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl { title } => write!(f, "No URL to fetch for '{}'", title),
            Self::InvalidUrl { url, reason } => write!(f, "Invalid URL {}: {}", url, reason),
            Self::HttpStatus { url, status } => write!(f, "GET {} returned {}", url, status),
            Self::Transport { message } => write!(f, "Transport error: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Error returned by the generation service.
///
/// This is the error type for [`GenerationService`](super::GenerationService).
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The service answered with a non-success status.
    Upstream { status: u16, message: String },

    /// Network or transport error.
    Transport { message: String },

    /// The service answered, but not with what was asked for.
    MalformedOutput { reason: String },

    /// The service answered with no content at all.
    EmptyResponse,
}

impl GenerationError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Upstream {
                    status: 408 | 429 | 500..=599,
                    ..
                }
        )
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream { status, message } => {
                write!(f, "Generation service error ({}): {}", status, message)
            }
            Self::Transport { message } => write!(f, "Transport error: {}", message),
            Self::MalformedOutput { reason } => {
                write!(f, "Malformed generation output: {}", reason)
            }
            Self::EmptyResponse => write!(f, "Generation service returned no content"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// Error from the record store or the artifact store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No record exists under this key.
    NotFound { key: String },

    /// The backing medium failed.
    Io { message: String },

    /// A record could not be encoded or decoded.
    Serialization { message: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "Record not found: {}", key),
            Self::Io { message } => write!(f, "Storage IO error: {}", message),
            Self::Serialization { message } => write!(f, "Record encoding error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
