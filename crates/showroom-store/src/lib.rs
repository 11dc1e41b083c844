//! Storage for the showroom catalog.
//!
//! Keeps product records and promotions in memory, seeded from a JSON file
//! and optionally snapshotted back to disk after every change. Product
//! records are stored raw so listings can report records that fail to
//! normalize; writes always store the canonical shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use showroom_store::{MemoryStore, StoreConfig};
//!
//! let store = MemoryStore::open(&StoreConfig {
//!     seed_path: Some("data/seed.json".into()),
//!     snapshot_path: None,
//! })?;
//! let listing = store.listing(&BusinessScope::default(), &Criteria::new())?;
//! ```

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::StoreFile;
pub use memory::{MemoryStore, StoreConfig};
