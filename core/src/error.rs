//! Error types for the marketplace API client.
//!
//! # Design
//! Two tiers. Transport and HTTP failures are `ApiError`s and come back as
//! `Err`. A 2xx response whose envelope says `success: false` is NOT an
//! error at this layer; it is returned as data and the caller inspects it
//! (or opts in via `ApiResponse::into_result`, which yields
//! `EnvelopeFailure`).
//!
//! The `Display` output of `ApiError` is the message shown to the user, so
//! its wording is part of the contract.

use thiserror::Error;

/// Failure reported by a `Transport` before any HTTP status was obtained
/// (unreachable host, DNS failure, reset connection, unreadable body).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by `ApiClient` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range. The response body is
    /// dropped, even when it carries a structured error envelope.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 2xx body that is not a valid envelope for the expected payload.
    #[error("{0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("{0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// An envelope that came back with `success: false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", failure_text(.error, .message))]
pub struct EnvelopeFailure {
    pub error: Option<String>,
    pub message: Option<String>,
}

fn failure_text<'a>(error: &'a Option<String>, message: &'a Option<String>) -> &'a str {
    error
        .as_deref()
        .or(message.as_deref())
        .unwrap_or("request was not successful")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_carries_only_the_status() {
        let err = ApiError::Http { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_not_found());
    }

    #[test]
    fn transport_error_message_is_verbatim() {
        let err = ApiError::from(TransportError::new("fetch failed"));
        assert_eq!(err.to_string(), "fetch failed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn envelope_failure_prefers_error_over_message() {
        let failure = EnvelopeFailure {
            error: Some("duplicate seller".to_string()),
            message: Some("could not create".to_string()),
        };
        assert_eq!(failure.to_string(), "duplicate seller");

        let failure = EnvelopeFailure {
            error: None,
            message: Some("could not create".to_string()),
        };
        assert_eq!(failure.to_string(), "could not create");

        let failure = EnvelopeFailure {
            error: None,
            message: None,
        };
        assert_eq!(failure.to_string(), "request was not successful");
    }
}
