//! Store error types.

use showroom_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with the given id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The record was rejected by the catalog rules.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Failed to read a seed or write a snapshot.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A seed or snapshot file is not valid JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Every id of this kind has been handed out.
    #[error("No {entity} ids left to assign")]
    IdsExhausted { entity: &'static str },

    /// A writer panicked while holding the lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn product(id: i64) -> Self {
        StoreError::NotFound {
            entity: "product",
            id,
        }
    }

    pub(crate) fn promotion(id: i64) -> Self {
        StoreError::NotFound {
            entity: "promotion",
            id,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}
