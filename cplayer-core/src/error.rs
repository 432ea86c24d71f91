//! Error types and result types for query compilation and request execution.
//!
//! Every compiler in this crate validates its own input before producing any output,
//! so a failure never leaves a half-built request behind.
//! Use [`ClientResult<T>`] as the return type for fallible operations.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Diagnostic code attached to every [`ClientError::InvalidArgument`].
pub const INVALID_ARGUMENT_CODE: u32 = 9002;

/// Represents all possible errors that can occur while compiling or dispatching a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A builder or assembler call received a malformed value.
    ///
    /// `operation` names the public call that failed (e.g. `"->where()"`),
    /// `message` describes the offending value.
    #[error("\"{operation}\" function: {message}")]
    InvalidArgument {
        /// The operation that rejected its input.
        operation: &'static str,
        /// Human readable description of the malformed value.
        message: String,
    },
    /// Serialization error while JSON-encoding a payload.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The transport collaborator failed to deliver the request.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The client configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Creates an [`ClientError::InvalidArgument`] for the given operation.
    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        ClientError::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    /// Returns the fixed diagnostic code for argument errors, `None` for every other kind.
    pub fn code(&self) -> Option<u32> {
        match self {
            ClientError::InvalidArgument { .. } => Some(INVALID_ARGUMENT_CODE),
            _ => None,
        }
    }
}

/// A specialized `Result` type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<SerdeJsonError> for ClientError {
    fn from(err: SerdeJsonError) -> Self {
        ClientError::Serialization(err.to_string())
    }
}
