//! Error types for attnlog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every attnlog crate.
///
/// Empty-result conditions (nothing to undo, nothing to export) are not
/// represented here; they are outcome variants of the operations that
/// produce them.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AttnError {
    /// User input was rejected before any store access
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Keyed store read/write/remove failure
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", "CSV"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation not allowed in the current context state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Confirmation token did not match the pending request
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttnError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn confirmation(message: impl Into<String>) -> Self {
        Self::Confirmation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for failures of the persistence layer (store or filesystem).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Store(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirmation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AttnError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AttnError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AttnError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for AttnError {
    fn from(err: csv::Error) -> Self {
        Self::Serialization {
            format: "CSV".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used by adapters built on anyhow
impl From<anyhow::Error> for AttnError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, AttnError>`.
pub type Result<T> = std::result::Result<T, AttnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: AttnError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: AttnError = serde_json::from_str::<Vec<u8>>("not json")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_store_counts_as_io() {
        assert!(AttnError::store("disk full").is_io());
        assert!(!AttnError::validation("empty").is_io());
    }
}
