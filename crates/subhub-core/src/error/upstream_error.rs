//! Failures talking to Google (YouTube Data API, OAuth2)

use thiserror::Error;

/// Upstream failure, kept distinct per cause so callers and logs can tell a
/// network outage from an exhausted quota or a revoked Google token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("YouTube API unreachable: {0}")]
    Network(String),

    #[error("Google rejected the access token: {0}")]
    Unauthorized(String),

    #[error("YouTube API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("YouTube API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected YouTube API response: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "UPSTREAM_UNAVAILABLE",
            Self::Unauthorized(_) => "GOOGLE_TOKEN_REJECTED",
            Self::QuotaExceeded(_) => "YOUTUBE_QUOTA_EXCEEDED",
            Self::Status { .. } => "UPSTREAM_ERROR",
            Self::Decode(_) => "UPSTREAM_BAD_RESPONSE",
        }
    }

    /// Classify a non-success HTTP response from a Google endpoint
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 if message.contains("quota") || message.contains("rateLimitExceeded") => {
                Self::QuotaExceeded(message)
            }
            429 => Self::QuotaExceeded(message),
            _ => Self::Status { status, message },
        }
    }
}
