use thiserror::Error;

use crate::types::FileId;

/// Errors surfaced by a [`RemoteStore`](crate::remote::RemoteStore).
///
/// `Network` and `Status` together form the "network error" class: the request either
/// never completed or came back with a non-success status. An empty file list is not
/// an error and never shows up here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The request did not complete (connection refused, CORS, aborted, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The store answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// `GET /download/{id}` did not succeed.
    #[error("file {0} not found")]
    NotFound(FileId),
    /// The body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ClientError::Status { status, message: message.into() }
    }

    /// True for transport failures and non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Status { .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
