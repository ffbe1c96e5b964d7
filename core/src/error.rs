//! Error types for the timetable API client.
//!
//! # Design
//! Every call resolves to exactly one `Result<T, ApiError>`. The variants
//! separate "no response at all" (`Transport`), "the server said no"
//! (`Status`, raw status and body kept verbatim), "the server said yes but
//! the body is not what the endpoint declares" (`Decode`) and "the caller
//! gave up" (`Cancelled`). The client never retries or recovers on its own.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors returned by `TimetableClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS failure, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `body` holds the bytes as
    /// received.
    #[error("HTTP {status}: {}", String::from_utf8_lossy(.body))]
    Status { status: u16, body: Vec<u8> },

    /// A 2xx response body did not match the declared response shape.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The call was aborted through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request could not be assembled from the endpoint and arguments.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Status code of a protocol error, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body bytes of a protocol error.
    pub fn raw_body(&self) -> Option<&[u8]> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Body of a protocol error as text, `None` when it is not UTF-8.
    pub fn body(&self) -> Option<&str> {
        self.raw_body().and_then(|body| std::str::from_utf8(body).ok())
    }

    /// Decodes the body of a protocol error, typically into a
    /// `SuccessResponse` carrying the server's diagnostic message.
    pub fn body_json<T: DeserializeOwned>(&self) -> Option<T> {
        self.raw_body().and_then(|body| serde_json::from_slice(body).ok())
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}
