//! Listing criteria and request-parameter parsing.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Filter criteria for a catalog listing. Every field is optional and an
/// absent field has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    /// Case-insensitive substring of model or description.
    pub text_query: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact model year.
    pub year: Option<i32>,
    /// Lower price bound, compared against the highest tier.
    pub min_price: Option<i64>,
    /// Upper price bound, compared against the lowest tier.
    pub max_price: Option<i64>,
    /// Transmission type offered by at least one tier.
    pub transmission_type: Option<String>,
    /// Exact color.
    pub color: Option<String>,
}

impl Criteria {
    /// Create empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. An empty query is ignored.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        self.text_query = (!q.is_empty()).then_some(q);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the model year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the transmission type.
    pub fn with_transmission(mut self, transmission_type: impl Into<String>) -> Self {
        self.transmission_type = Some(transmission_type.into());
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether any price bound is set.
    pub fn has_price_bounds(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse criteria from request parameters.
    ///
    /// Accepts the current keys and the legacy form keys. Empty values are
    /// treated as absent and unknown keys are ignored; a numeric field that
    /// does not parse, or a negative price, is an `InvalidCriteria` error.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Criteria::new();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "q" | "textQuery" | "search" => criteria.text_query = Some(value.to_string()),
                "category" | "jenis" => criteria.category = Some(value.to_string()),
                "year" | "tahun" => {
                    criteria.year = Some(
                        value
                            .parse()
                            .map_err(|_| CatalogError::invalid_criteria("year", value))?,
                    )
                }
                "minPrice" | "hargaMin" => criteria.min_price = Some(parse_price("minPrice", value)?),
                "maxPrice" | "hargaMax" => criteria.max_price = Some(parse_price("maxPrice", value)?),
                "transmissionType" | "transmisi" => {
                    criteria.transmission_type = Some(value.to_string())
                }
                "color" | "warna" => criteria.color = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(criteria)
    }
}

fn parse_price(field: &'static str, value: &str) -> Result<i64, CatalogError> {
    match value.parse::<i64>() {
        Ok(price) if price >= 0 => Ok(price),
        _ => Err(CatalogError::invalid_criteria(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builder() {
        let criteria = Criteria::new()
            .with_text("avanza")
            .with_category("MPV")
            .with_price_range(Some(100), None)
            .with_color("Putih");

        assert_eq!(criteria.text_query.as_deref(), Some("avanza"));
        assert!(criteria.has_price_bounds());
        assert!(!criteria.is_empty());
        assert!(Criteria::new().with_text("").is_empty());
    }

    #[test]
    fn test_parse_current_keys() {
        let criteria = Criteria::from_pairs([
            ("q", "fortuner"),
            ("category", "SUV"),
            ("year", "2024"),
            ("minPrice", "500000000"),
            ("maxPrice", "700000000"),
            ("transmissionType", "Automatic"),
            ("color", "Hitam"),
        ])
        .unwrap();

        assert_eq!(
            criteria,
            Criteria::new()
                .with_text("fortuner")
                .with_category("SUV")
                .with_year(2024)
                .with_price_range(Some(500_000_000), Some(700_000_000))
                .with_transmission("Automatic")
                .with_color("Hitam")
        );
    }

    #[test]
    fn test_parse_legacy_keys() {
        let criteria = Criteria::from_pairs([
            ("search", "avanza"),
            ("jenis", "MPV"),
            ("tahun", "2024"),
            ("hargaMin", "1"),
            ("hargaMax", "2"),
            ("transmisi", "Manual"),
            ("warna", "Merah"),
        ])
        .unwrap();

        assert_eq!(criteria.text_query.as_deref(), Some("avanza"));
        assert_eq!(criteria.category.as_deref(), Some("MPV"));
        assert_eq!(criteria.year, Some(2024));
        assert_eq!(criteria.min_price, Some(1));
        assert_eq!(criteria.max_price, Some(2));
        assert_eq!(criteria.transmission_type.as_deref(), Some("Manual"));
        assert_eq!(criteria.color.as_deref(), Some("Merah"));
    }

    #[test]
    fn test_empty_values_and_unknown_keys_ignored() {
        let criteria =
            Criteria::from_pairs([("jenis", ""), ("hargaMin", "  "), ("page", "2")]).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_matches!(
            Criteria::from_pairs([("tahun", "dua ribu")]),
            Err(CatalogError::InvalidCriteria { field: "year", .. })
        );
        assert_matches!(
            Criteria::from_pairs([("hargaMax", "murah")]),
            Err(CatalogError::InvalidCriteria { field: "maxPrice", .. })
        );
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_matches!(
            Criteria::from_pairs([("minPrice", "-1")]),
            Err(CatalogError::InvalidCriteria { field: "minPrice", .. })
        );
    }
}
