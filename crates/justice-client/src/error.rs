//! Errors raised by the HTTP wrapper.

use thiserror::Error;

/// Convenience alias for wrapper results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure modes of a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Fully-qualified request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("API error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// The body could not be decoded into the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
    /// JSON was expected but the backend returned text.
    #[error("expected a JSON body, received text: {0}")]
    UnexpectedBody(String),
    /// The request could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status code, when the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
