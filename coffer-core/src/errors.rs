use thiserror::Error;

/// Opaque backend fault reported by a [`crate::store::KvStore`].
///
/// Backends log the underlying cause themselves; callers only need to know
/// that the store failed, not why.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("store error: {message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejection produced when a trail cannot be encoded as a storage key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("trail must not be empty")]
    EmptyTrail,
    #[error("trail segment contains a path separator: {segment}")]
    SeparatorInSegment { segment: String },
    #[error("trail contains an empty segment before the final position")]
    EmptySegment,
}

/// Rejection produced when a request body is not a valid simple secret.
///
/// Messages match the error strings emitted to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("Invalid JSON in payload")]
    InvalidJson,
    #[error("Message type missing")]
    TypeMissing,
    #[error("Message type unknown")]
    TypeUnknown,
    #[error("Message value missing")]
    ValueMissing,
    #[error("Unknown attributes in Message")]
    UnknownAttributes,
}
