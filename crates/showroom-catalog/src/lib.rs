//! Vehicle catalog domain types and listing engine for Showroom.
//!
//! - **Catalog**: the canonical [`Product`], the loosely shaped
//!   [`RawProduct`] it is normalized from, promotions, business scope
//! - **Search**: criteria parsing, filter predicates, listing assembly
//! - **Price**: transmission price tiers and Rupiah formatting
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use showroom_catalog::prelude::*;
//!
//! let records = vec![RawProduct::from_json(json!({
//!     "id": 1,
//!     "model": "All New Avanza",
//!     "jenis": "MPV",
//!     "transmisi": ["Manual", "Automatic"],
//!     "harga": 300000000
//! }))
//! .unwrap()];
//!
//! let criteria = Criteria::from_pairs([("transmisi", "Automatic")]).unwrap();
//! let listing = build_listing(&records, &criteria);
//!
//! assert_eq!(listing.items.len(), 1);
//! assert_eq!(listing.facets.categories, vec!["MPV"]);
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use price::{format_rupiah, PriceRange, PriceTier};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::price::{format_rupiah, PriceRange, PriceTier};

    // Catalog
    pub use crate::catalog::{
        apply_patch, normalize, BusinessScope, PriceShape, Product, Promotion, PromotionDraft,
        PromotionPatch, RawProduct,
    };

    // Search
    pub use crate::search::{build_listing, filter_all, matches, Criteria, Facets, Listing};
}
