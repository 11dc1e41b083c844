//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A raw record has no usable identity.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A criteria value could not be coerced to its expected type.
    #[error("Invalid criteria: {field}={value:?}")]
    InvalidCriteria { field: &'static str, value: String },

    /// Validation error on an administrative write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    /// Build an `InvalidCriteria` error for a field.
    pub fn invalid_criteria(field: &'static str, value: impl Into<String>) -> Self {
        CatalogError::InvalidCriteria {
            field,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
