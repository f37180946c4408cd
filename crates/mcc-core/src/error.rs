//! Error types for the MCC application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire MCC application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Only a small subset of
/// variants is ever shown to the user (see [`MccError::is_user_visible`]);
/// everything else is absorbed at its originating component.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MccError {
    /// Network/connection failure while talking to the agent platform
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote agent reported a failure with its own reason
    #[error("{0}")]
    RemoteFailure(String),

    /// The remote agent reported success but returned no usable payload
    #[error("Received empty response from agent")]
    EmptyResponse,

    /// A task is already running on this runner
    #[error("A task is already in progress")]
    Busy,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MccError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a RemoteFailure error
    pub fn remote_failure(message: impl Into<String>) -> Self {
        Self::RemoteFailure(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for error variants that may be surfaced to the user.
    ///
    /// Transport failures, remote-reported failures, and empty responses are
    /// the only user-visible conditions. Storage and tracking errors are
    /// absorbed by their owning components.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::RemoteFailure(_) | Self::EmptyResponse
        )
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for MccError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MccError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MccError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MccError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MccError>`.
pub type Result<T> = std::result::Result<T, MccError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_variants() {
        assert!(MccError::transport("connection refused").is_user_visible());
        assert!(MccError::remote_failure("rate limited").is_user_visible());
        assert!(MccError::EmptyResponse.is_user_visible());

        assert!(!MccError::data_access("disk full").is_user_visible());
        assert!(!MccError::internal("oops").is_user_visible());
        assert!(!MccError::Busy.is_user_visible());
    }

    #[test]
    fn test_remote_failure_message_is_verbatim() {
        let err = MccError::remote_failure("rate limited");
        assert_eq!(err.to_string(), "rate limited");
    }
}
