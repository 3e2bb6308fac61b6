//! Error types for the document-path client.
//!
//! # Design
//! Every failure carries a human-readable message; there are no structured
//! error codes. Non-2xx responses land in `Status` whose message is either
//! taken from the server's JSON body or a fixed per-operation string,
//! depending on the operation (see `client::ErrorPolicy`).

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection refused, DNS, timeout...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The message a caller would show to a user.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
