//! Errors produced while fetching a feed page.
//!
//! Every variant surfaces as the list's last error with a retry
//! affordance; none of them is fatal to the process.

use std::fmt;

use crate::traits::HttpError;

/// Fallback reason when the upstream reports a failure without one.
pub const GENERIC_FETCH_FAILURE: &str = "Failed to fetch news";

/// Feed fetch error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The transport gave up waiting for a response.
    TransportTimeout { duration_secs: u64 },

    /// Connection, DNS, TLS or non-2xx HTTP failure.
    TransportFailure { message: String },

    /// The endpoint answered with a non-zero application code.
    Application { reason: String },

    /// The body could not be decoded as the expected envelope.
    MalformedResponse { message: String },
}

impl FeedError {
    /// Build an application error, falling back to a generic reason when
    /// the upstream sent an empty one.
    pub fn application(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if reason.trim().is_empty() {
            FeedError::Application {
                reason: GENERIC_FETCH_FAILURE.to_string(),
            }
        } else {
            FeedError::Application { reason }
        }
    }

    /// Whether re-running the same request has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::TransportTimeout { .. } => true,
            FeedError::TransportFailure { .. } => true,
            FeedError::Application { .. } => false,
            FeedError::MalformedResponse { .. } => false,
        }
    }

    /// Message shown inline in the list.
    pub fn user_message(&self) -> String {
        match self {
            FeedError::TransportTimeout { .. } => {
                "Request timed out, please check your network connection".to_string()
            }
            FeedError::TransportFailure { .. } => {
                "Network error, please try again later".to_string()
            }
            FeedError::Application { reason } => reason.clone(),
            FeedError::MalformedResponse { .. } => {
                "Received an invalid response from the server".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FeedError::TransportTimeout { .. } => "E_FEED_TIMEOUT",
            FeedError::TransportFailure { .. } => "E_FEED_TRANSPORT",
            FeedError::Application { .. } => "E_FEED_APP",
            FeedError::MalformedResponse { .. } => "E_FEED_MALFORMED",
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::TransportTimeout { duration_secs } => {
                write!(f, "request timed out after {} seconds", duration_secs)
            }
            FeedError::TransportFailure { message } => {
                write!(f, "transport failure: {}", message)
            }
            FeedError::Application { reason } => write!(f, "application error: {}", reason),
            FeedError::MalformedResponse { message } => {
                write!(f, "malformed response: {}", message)
            }
        }
    }
}

impl std::error::Error for FeedError {}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedResponse {
            message: err.to_string(),
        }
    }
}

/// Classify a transport-level [`HttpError`].
///
/// `timeout_secs` is the ceiling the client was configured with; it only
/// feeds the diagnostic text.
pub fn classify_http_error(err: HttpError, timeout_secs: u64) -> FeedError {
    match err {
        HttpError::Timeout(_) => FeedError::TransportTimeout {
            duration_secs: timeout_secs,
        },
        HttpError::ServerError { status, message } => FeedError::TransportFailure {
            message: format!("HTTP {}: {}", status, message),
        },
        other => FeedError::TransportFailure {
            message: other.to_string(),
        },
    }
}
