//! Listing assembly: normalize, facet, filter and order.

use crate::catalog::{normalize, Product, RawProduct};
use crate::error::CatalogError;
use crate::search::{filter_all, Criteria};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Distinct values across the whole catalog, used to build filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
}

impl Facets {
    /// Collect facets in first-seen order, skipping blank values.
    pub fn from_products<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut facets = Facets::default();
        for product in products {
            push_distinct(&mut facets.categories, &product.category);
            for color in &product.colors {
                push_distinct(&mut facets.colors, color);
            }
        }
        facets
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// A record that could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position of the record in the input.
    pub index: usize,
    pub reason: String,
}

/// The response of a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Matching products, highest id first.
    pub items: Vec<Product>,
    pub facets: Facets,
    /// Records skipped during normalization. Not part of the response body.
    #[serde(skip)]
    pub dropped: Vec<DroppedRecord>,
}

impl Listing {
    /// Number of listed products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build a listing from scoped raw records.
///
/// Records that cannot be normalized, or that repeat an id already listed,
/// are skipped and reported in [`Listing::dropped`]. Facets are computed over every normalized record,
/// not just the filtered ones.
pub fn build_listing<'a, I>(raw_products: I, criteria: &Criteria) -> Listing
where
    I: IntoIterator<Item = &'a RawProduct>,
{
    let mut products = Vec::new();
    let mut dropped = Vec::new();
    let mut seen = HashSet::new();

    for (index, raw) in raw_products.into_iter().enumerate() {
        let outcome = normalize(raw).and_then(|product| {
            if seen.insert(product.id) {
                Ok(product)
            } else {
                Err(CatalogError::MalformedRecord(format!(
                    "duplicate id {}",
                    product.id
                )))
            }
        });
        match outcome {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping catalog record");
                dropped.push(DroppedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    let facets = Facets::from_products(&products);
    let mut items = filter_all(products, criteria);
    items.sort_by(|a, b| b.id.cmp(&a.id));

    tracing::debug!(
        items = items.len(),
        dropped = dropped.len(),
        "Built catalog listing"
    );

    Listing {
        items,
        facets,
        dropped,
    }
}
