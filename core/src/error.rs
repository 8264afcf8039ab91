//! Error types for the blog API client.
//!
//! `BadRequest` gets a dedicated variant because the server rejects incomplete
//! posts with 400 and callers want to tell that apart from server failures.

/// Errors returned by `BlogClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 400; `body` carries its `{"error": ...}` message.
    #[error("bad request: {body}")]
    BadRequest { body: String },

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
