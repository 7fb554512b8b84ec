//! Error types for Rosterbot
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Rosterbot operations
///
/// This enum encompasses all possible errors that can occur while routing
/// an inbound chat message: configuration loading, session storage,
/// free-text validation, entity lookups, and calls to the fantasy and
/// messaging collaborators.
#[derive(Error, Debug)]
pub enum RosterbotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The user has no linked credentials
    #[error("Authentication required: no linked account")]
    AuthenticationRequired,

    /// Credentials expired and the silent refresh failed
    #[error("Authentication expired: {0}")]
    AuthenticationExpired(String),

    /// User input does not match the shape expected by the current flow step
    #[error("Validation error: {0}")]
    Validation(String),

    /// A named entity (player, team, transaction) could not be resolved
    #[error("Could not find {entity}: {name}")]
    Lookup {
        /// The kind of entity that failed to resolve
        entity: &'static str,
        /// The name the user supplied
        name: String,
    },

    /// A call to the fantasy data collaborator failed
    #[error("Fantasy API error: {0}")]
    Collaborator(String),

    /// Outbound message delivery failed
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Rosterbot operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = RosterbotError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_authentication_required_display() {
        let error = RosterbotError::AuthenticationRequired;
        assert_eq!(
            error.to_string(),
            "Authentication required: no linked account"
        );
    }

    #[test]
    fn test_authentication_expired_display() {
        let error = RosterbotError::AuthenticationExpired("refresh rejected".to_string());
        assert_eq!(error.to_string(), "Authentication expired: refresh rejected");
    }

    #[test]
    fn test_validation_error_display() {
        let error = RosterbotError::Validation("expected a number".to_string());
        assert_eq!(error.to_string(), "Validation error: expected a number");
    }

    #[test]
    fn test_lookup_error_display() {
        let error = RosterbotError::Lookup {
            entity: "player",
            name: "Patrick Mahomes".to_string(),
        };
        assert_eq!(error.to_string(), "Could not find player: Patrick Mahomes");
    }

    #[test]
    fn test_collaborator_error_display() {
        let error = RosterbotError::Collaborator("503 from upstream".to_string());
        assert_eq!(error.to_string(), "Fantasy API error: 503 from upstream");
    }

    #[test]
    fn test_storage_error_display() {
        let error = RosterbotError::Storage("session missing".to_string());
        assert_eq!(error.to_string(), "Storage error: session missing");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RosterbotError = io_error.into();
        assert!(matches!(error, RosterbotError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: RosterbotError = json_error.into();
        assert!(matches!(error, RosterbotError::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RosterbotError>();
    }
}
