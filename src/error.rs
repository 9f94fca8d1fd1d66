//! Error types for the subtitle client
//!
//! Four failure classes reach callers:
//! - **Transport**: raised by the RPC collaborator, passed through untouched
//! - **Marshal**: the wire value tree did not have the expected shape
//! - **RemoteStatus**: the service refused the call (only some operations)
//! - **Io**: local file access while hashing or writing subtitles

use thiserror::Error;

use crate::models::Status;

/// Result alias used throughout the library
pub type Result<T, E = SubtleError> = std::result::Result<T, E>;

/// Top-level library error
#[derive(Error, Debug)]
pub enum SubtleError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    Marshal(#[from] MarshalError),

    #[error("service returned {status}: {message}")]
    RemoteStatus { status: Status, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a [`Transport`](crate::rpc::Transport) implementation
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("remote fault {code}: {message}")]
    Fault { code: i32, message: String },

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Shape errors found while converting wire values into typed models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarshalError {
    #[error("expected {expected} for `{field}`, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("invalid status line {0:?}")]
    InvalidStatus(String),

    #[error("invalid subtitle id {0:?}")]
    InvalidId(String),

    #[error("unusable subtitle file name {0:?}")]
    InvalidFileName(String),

    #[error("undecodable subtitle payload: {0}")]
    Payload(String),
}

impl MarshalError {
    pub(crate) fn mismatch(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        MarshalError::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_message() {
        let err = SubtleError::RemoteStatus {
            status: Status::NoSession,
            message: "406 No session".to_string(),
        };
        assert_eq!(err.to_string(), "service returned 406: 406 No session");
    }

    #[test]
    fn test_marshal_error_converts() {
        let err: SubtleError = MarshalError::MissingField("IDSubtitleFile".into()).into();
        assert!(matches!(err, SubtleError::Marshal(MarshalError::MissingField(_))));
        assert!(err.to_string().contains("IDSubtitleFile"));
    }
}
