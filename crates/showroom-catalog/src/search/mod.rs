//! Search module.
//!
//! Contains the listing criteria, the filter predicates, and the listing
//! assembler that ties normalization, facets and ordering together.

mod criteria;
mod filter;
mod listing;

pub use criteria::Criteria;
pub use filter::{filter_all, matches};
pub use listing::{build_listing, DroppedRecord, Facets, Listing};
