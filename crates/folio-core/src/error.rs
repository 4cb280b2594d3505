//! Error types for the Folio application.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Folio application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every gateway operation
/// returns `Result<T, FolioError>` rather than panicking; the error message
/// is what gets surfaced to the user (login form message or page banner).
#[derive(Error, Debug, Clone, Serialize)]
pub enum FolioError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error (missing or invalid environment values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error (invalid credentials, expired session)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Remote gateway error (network failure, constraint violation,
    /// auth rejection by the persistence service)
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FolioError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Creates a Gateway error
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Returns the message a view should surface for this error.
    ///
    /// Auth and gateway errors carry the remote service's human-readable
    /// message verbatim; other variants fall back to their Display form.
    pub fn surface_message(&self) -> String {
        match self {
            Self::Auth(message) | Self::Gateway(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from String (for error messages)
impl From<String> for FolioError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, FolioError>`.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_message_passes_gateway_text_through() {
        let err = FolioError::gateway("permission denied");
        assert_eq!(err.surface_message(), "permission denied");
    }

    #[test]
    fn test_surface_message_uses_display_for_other_variants() {
        let err = FolioError::not_found("project", "7");
        assert_eq!(err.surface_message(), "Entity not found: project '7'");
    }

    #[test]
    fn test_predicates() {
        assert!(FolioError::config("missing SUPABASE_URL").is_config());
        assert!(FolioError::auth("invalid credentials").is_auth());
        assert!(FolioError::not_found("skill", "42").is_not_found());
    }
}
