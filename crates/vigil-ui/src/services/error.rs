//! Errors surfaced by the HTTP service layer.

use crate::models::EnvelopeError;
use thiserror::Error;

/// Failure of a backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, abort).
    #[error("request to {path} failed: {detail}")]
    Transport {
        /// Request path.
        path: String,
        /// Transport error text.
        detail: String,
    },
    /// The backend answered with a non-success HTTP status.
    #[error("request to {path} returned HTTP {status}")]
    Status {
        /// Request path.
        path: String,
        /// HTTP status code.
        status: u16,
    },
    /// The body could not be decoded into the expected shape.
    #[error("response from {path} could not be decoded: {detail}")]
    Decode {
        /// Request path.
        path: String,
        /// Decoder error text.
        detail: String,
    },
    /// The `{dat, err}` envelope carried an error.
    #[error("backend rejected {path}: {source}")]
    Backend {
        /// Request path.
        path: String,
        /// Envelope failure.
        #[source]
        source: EnvelopeError,
    },
    /// Prometheus reported a query error.
    #[error("query failed: {0}")]
    Query(String),
    /// A request payload could not be prepared.
    #[error("invalid request payload: {0}")]
    Payload(String),
}

impl ApiError {
    /// Attach the request path to an envelope failure.
    #[must_use]
    pub fn backend(path: &str, source: EnvelopeError) -> Self {
        Self::Backend {
            path: path.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_path() {
        let err = ApiError::Status {
            path: "/api/n9e/busi-groups".to_string(),
            status: 502,
        };
        assert_eq!(err.to_string(), "request to /api/n9e/busi-groups returned HTTP 502");
    }

    #[test]
    fn backend_errors_wrap_the_envelope_message() {
        let err = ApiError::backend("/api/n9e/board/1", EnvelopeError::Backend("no such board".into()));
        assert!(matches!(err, ApiError::Backend { .. }));
        assert_eq!(
            err.to_string(),
            "backend rejected /api/n9e/board/1: backend reported an error: no such board"
        );
    }
}
