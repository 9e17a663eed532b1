//! Relay error taxonomy.

use thiserror::Error;

/// Reasons an outbound call did not complete.
#[derive(Debug, Error)]
pub enum UpstreamError {
    // Envelope values stay out of the message; it is logged at warn.
    #[error("invalid HTTP method")]
    InvalidMethod,

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("invalid header value")]
    InvalidHeaderValue,

    #[error("outbound call timed out")]
    Timeout,

    #[error("http client error: {0}")]
    Transport(reqwest::Error),

    #[error("outbound task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            // The target URL is envelope content; keep it out of logs.
            UpstreamError::Transport(e.without_url())
        }
    }
}

/// Every way a relay request can end without a 200 envelope.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Anything other than `POST /bridge`.
    #[error("no route for {method} {target}")]
    NotFound { method: String, target: String },

    /// Inbound body could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// Body is not a JSON object of the expected shape.
    #[error("malformed envelope: {0}")]
    Decode(#[source] serde_json::Error),

    /// Envelope has no usable `url`.
    #[error("envelope is missing `url`")]
    MissingUrl,

    /// The outbound call did not complete.
    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
}

impl RelayError {
    /// Metrics label for this outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::NotFound { .. } => "not_found",
            RelayError::Body(_) | RelayError::Decode(_) => "decode_error",
            RelayError::MissingUrl => "validation_error",
            RelayError::Upstream(_) => "upstream_error",
        }
    }
}
