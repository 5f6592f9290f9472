//! Error types for the client layer

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the rules backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, DNS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Local validation failed before any request was sent
    #[error("{0}")]
    Validation(String),

    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration is incomplete or invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The owning view was closed before the call completed
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Message the backend attached to a failed request, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing
    #[error("{field} must be set")]
    MissingField { field: String },

    /// A field has a value the client cannot use
    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },
}
