//! Error types for the record store.

use crate::types::RecordId;
use thiserror::Error;

/// Main error type for store operations.
///
/// Validation and conflict errors are detected before any mutation, so a
/// failed operation always leaves the store exactly as it was.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("invalid {field}: {value:?} is not a YYYY-MM-DD date")]
    InvalidDate {
        field: &'static str,
        value: String,
    },

    #[error("invalid amount: {0:?} is not a number")]
    InvalidAmount(String),

    #[error("email already registered: {0}")]
    EmailExists(String),

    #[error("record not found: {0}")]
    NotFound(RecordId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
