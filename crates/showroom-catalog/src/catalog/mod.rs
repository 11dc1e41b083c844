//! Product catalog module.
//!
//! Contains the canonical product, the raw record it is normalized from,
//! and promotions.

mod normalize;
mod product;
mod promotion;
mod raw;
mod scope;

pub use normalize::{apply_patch, normalize, PriceShape};
pub use product::{
    Product, DEFAULT_BRAND, DEFAULT_CONDITION, DEFAULT_FUEL_TYPE, DEFAULT_TRANSMISSION,
    MAX_IMAGES,
};
pub use promotion::{Promotion, PromotionDraft, PromotionPatch};
pub use raw::{LooseInt, OneOrMany, RawProduct};
pub use scope::BusinessScope;
