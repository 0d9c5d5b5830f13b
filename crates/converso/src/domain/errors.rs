//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// No session, or a session without a user id
    #[error("User must be authenticated to access this resource")]
    Unauthenticated,

    /// Identity present but not allowed to perform the action
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Could not acquire a data store access token: {0}")]
    TokenAcquisitionFailed(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },

    #[error("Companion limit reached for the current plan")]
    QuotaExceeded,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Any failure reported by the data store, carrying its message
    #[error("Store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Message reported by the data store, if this is a store failure
    pub fn store_message(&self) -> Option<&str> {
        match self {
            Self::Store(message) => Some(message),
            _ => None,
        }
    }
}
