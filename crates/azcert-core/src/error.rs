//! Error types for the data-access layer.
//!
//! - [`ApiError`] - user-facing failure of a certificate operation
//! - [`TransportError`] - failure below HTTP (connection, request building)
//!
//! `ApiError` messages are written for direct display in a toast or alert.
//! They never carry raw server detail.

use thiserror::Error;

/// Message shown for any transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Message shown for HTTP 500 on every operation.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later or contact support.";

/// Category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Permission,
    NotFound,
    Conflict,
    Server,
    Network,
    Retryable,
}

/// A failed certificate operation, categorized for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request body rejected (HTTP 400).
    #[error("{0}")]
    Validation(String),
    /// Caller lacks permission (HTTP 401/403).
    #[error("{0}")]
    Permission(String),
    /// Record does not exist (HTTP 404 on single-record operations).
    #[error("{0}")]
    NotFound(String),
    /// Duplicate serial number (HTTP 409).
    #[error("{0}")]
    Conflict(String),
    /// Backend failure (HTTP 500).
    #[error("{0}")]
    Server(String),
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),
    /// Any other failure; the user may simply try again.
    #[error("{0}")]
    Retryable(String),
}

impl ApiError {
    /// Network error with the standard connectivity message.
    pub fn network() -> Self {
        Self::Network(NETWORK_ERROR_MESSAGE.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Permission(_) => ErrorKind::Permission,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Server(_) => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Retryable(_) => ErrorKind::Retryable,
        }
    }

    /// The display message.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m)
            | Self::Permission(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::Server(m)
            | Self::Network(m)
            | Self::Retryable(m) => m,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(_: TransportError) -> Self {
        Self::network()
    }
}

/// Failure below the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be built (bad URL, unserializable body).
    #[error("failed to create request: {0}")]
    RequestCreationFailed(String),
    /// Connection, DNS, TLS or CORS failure.
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be read.
    #[error("failed to read response")]
    ResponseReadFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_becomes_network_error() {
        let err: ApiError = TransportError::Network("dns lookup failed".into()).into();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
        assert!(!err.message().contains("dns"));
    }

    #[test]
    fn test_display_is_message() {
        let err = ApiError::Conflict("duplicate".into());
        assert_eq!(err.to_string(), "duplicate");
        assert_eq!(err.message(), "duplicate");
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
