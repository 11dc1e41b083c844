//! Canonical vehicle product type.

use crate::ids::ProductId;
use crate::price::{PriceRange, PriceTier};
use serde::{Deserialize, Serialize};

/// Brand assumed when a record carries none.
pub const DEFAULT_BRAND: &str = "Toyota";
/// Fuel type assumed when a record carries none.
pub const DEFAULT_FUEL_TYPE: &str = "Bensin";
/// Condition assumed when a record carries none ("new").
pub const DEFAULT_CONDITION: &str = "Baru";
/// Transmission assumed for a flat legacy price with no transmission.
pub const DEFAULT_TRANSMISSION: &str = "Manual";
/// Maximum number of images kept per product.
pub const MAX_IMAGES: usize = 10;

/// A vehicle in the catalog, in its single canonical shape.
///
/// Every downstream consumer works on this type only; legacy record shapes
/// are resolved by [`normalize`](crate::catalog::normalize) before a
/// `Product` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, immutable identifier.
    pub id: ProductId,
    /// Manufacturer brand.
    pub brand: String,
    /// Model name, used for display.
    pub model: String,
    /// Model year (0 when unknown).
    pub year: i32,
    /// Odometer reading in kilometres.
    pub mileage: i64,
    /// Available colors, in display order.
    pub colors: Vec<String>,
    /// Purchasable configurations, one per transmission type.
    pub price_tiers: Vec<PriceTier>,
    /// Fuel type (e.g., "Bensin", "Diesel").
    pub fuel_type: String,
    /// Condition (e.g., "Baru").
    pub condition: String,
    /// Body category (e.g., "SUV", "MPV").
    pub category: String,
    /// Free-form description.
    pub description: String,
    /// Image references; the first one is the cover.
    pub images: Vec<String>,
    /// Units in stock.
    pub stock: i64,
}

impl Product {
    /// Create a product with every optional field at its default.
    pub fn new(id: ProductId, model: impl Into<String>) -> Self {
        Self {
            id,
            brand: DEFAULT_BRAND.to_string(),
            model: model.into(),
            year: 0,
            mileage: 0,
            colors: Vec::new(),
            price_tiers: Vec::new(),
            fuel_type: DEFAULT_FUEL_TYPE.to_string(),
            condition: DEFAULT_CONDITION.to_string(),
            category: String::new(),
            description: String::new(),
            images: Vec::new(),
            stock: 0,
        }
    }

    /// Price span across all tiers, `None` when the product has no price.
    pub fn price_range(&self) -> Option<PriceRange> {
        PriceRange::of(&self.price_tiers)
    }

    /// Whether the product is offered in the given color.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whether any tier uses the given transmission type.
    pub fn offers_transmission(&self, transmission_type: &str) -> bool {
        self.price_tiers
            .iter()
            .any(|t| t.transmission_type == transmission_type)
    }

    /// Cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Check if the product has units available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avanza() -> Product {
        let mut product = Product::new(ProductId::new(1), "All New Avanza");
        product.colors = vec!["Putih".into(), "Hitam".into()];
        product.price_tiers = vec![
            PriceTier::new("Manual", 300_000_000),
            PriceTier::new("Automatic", 350_000_000),
        ];
        product.images = vec!["/uploads/a.jpg".into(), "/uploads/b.jpg".into()];
        product
    }

    #[test]
    fn test_product_defaults() {
        let product = Product::new(ProductId::new(3), "Raize");
        assert_eq!(product.brand, "Toyota");
        assert_eq!(product.fuel_type, "Bensin");
        assert_eq!(product.condition, "Baru");
        assert!(product.price_range().is_none());
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_product_lookups() {
        let product = avanza();
        assert!(product.has_color("Putih"));
        assert!(!product.has_color("putih"));
        assert!(product.offers_transmission("Automatic"));
        assert!(!product.offers_transmission("CVT"));
        assert_eq!(product.cover_image(), Some("/uploads/a.jpg"));
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(avanza()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["fuelType"], "Bensin");
        assert_eq!(json["priceTiers"][1]["transmissionType"], "Automatic");
    }
}
