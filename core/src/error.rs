//! Error types for the sentiment API client.
//!
//! # Design
//! The user only ever sees one message for a failed attempt, but the cause
//! is kept here in full so the controller can log it and tests can assert
//! on which of the failure paths was taken.

use thiserror::Error;

/// Errors produced while building, executing or parsing an analysis request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// reset, timeout in the underlying transport).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `message` holds the
    /// server's `{"error": ...}` text when the body had that shape.
    #[error("HTTP {status}: {}", detail(.message, .body))]
    HttpError {
        status: u16,
        body: String,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

fn detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unreachable,
    Status,
    MalformedBody,
    Encoding,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Transport(_) => FailureKind::Unreachable,
            ApiError::HttpError { .. } => FailureKind::Status,
            ApiError::DeserializationError(_) => FailureKind::MalformedBody,
            ApiError::SerializationError(_) => FailureKind::Encoding,
        }
    }

    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
