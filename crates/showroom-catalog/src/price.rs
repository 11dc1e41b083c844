//! Price tiers and rupiah presentation.
//!
//! Prices are whole rupiah stored as `i64`; the currency has no minor unit
//! in practice, so there is no fractional part to carry around.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    /// Transmission type (e.g., "Manual", "Automatic").
    pub transmission_type: String,
    /// Price in rupiah. Never negative.
    pub price: i64,
}

impl PriceTier {
    /// Create a new price tier.
    pub fn new(transmission_type: impl Into<String>, price: i64) -> Self {
        Self {
            transmission_type: transmission_type.into(),
            price,
        }
    }
}

/// Inclusive price span across a product's tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    /// Compute the range of a tier list. `None` when there are no tiers.
    pub fn of(tiers: &[PriceTier]) -> Option<Self> {
        let min = tiers.iter().map(|t| t.price).min()?;
        let max = tiers.iter().map(|t| t.price).max()?;
        Some(Self { min, max })
    }

    /// Whether the range reaches at least `floor`.
    pub fn reaches(&self, floor: i64) -> bool {
        self.max >= floor
    }

    /// Whether the range starts at or below `ceiling`.
    pub fn starts_within(&self, ceiling: i64) -> bool {
        self.min <= ceiling
    }

    /// Whether every tier has the same price.
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", format_rupiah(self.min))
        } else {
            write!(f, "{} - {}", format_rupiah(self.min), format_rupiah(self.max))
        }
    }
}

/// Format an amount the way Indonesian price tags read: `Rp 300.000.000`.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(1000), "Rp 1.000");
        assert_eq!(format_rupiah(300_000_000), "Rp 300.000.000");
        assert_eq!(format_rupiah(-25_000), "-Rp 25.000");
    }

    #[test]
    fn test_range_of_tiers() {
        let tiers = vec![
            PriceTier::new("Manual", 300_000_000),
            PriceTier::new("Automatic", 350_000_000),
        ];
        let range = PriceRange::of(&tiers).unwrap();
        assert_eq!(range.min, 300_000_000);
        assert_eq!(range.max, 350_000_000);
        assert!(range.reaches(320_000_000));
        assert!(!range.starts_within(299_999_999));
        assert_eq!(range.to_string(), "Rp 300.000.000 - Rp 350.000.000");
    }

    #[test]
    fn test_range_of_empty_tiers() {
        assert_eq!(PriceRange::of(&[]), None);
    }

    #[test]
    fn test_single_price_display() {
        let range = PriceRange::of(&[PriceTier::new("Automatic", 550_000_000)]).unwrap();
        assert!(range.is_single());
        assert_eq!(range.to_string(), "Rp 550.000.000");
    }

    #[test]
    fn test_tier_serializes_camel_case() {
        let json = serde_json::to_value(PriceTier::new("Manual", 1)).unwrap();
        assert_eq!(json["transmissionType"], "Manual");
        assert_eq!(json["price"], 1);
    }
}
