//! Raw record → canonical [`Product`].
//!
//! Normalization is a pure shape coercion: scalars become sequences, missing
//! fields take their defaults and the three historical price layouts collapse
//! into one tier list. It validates identity and nothing else.

use crate::catalog::product::{
    DEFAULT_BRAND, DEFAULT_CONDITION, DEFAULT_FUEL_TYPE, DEFAULT_TRANSMISSION, MAX_IMAGES,
};
use crate::catalog::raw::{LooseInt, OneOrMany, RawProduct, RawTier};
use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::price::PriceTier;

/// The price layout a raw record uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceShape {
    /// Current layout: explicit `{transmissionType, price}` tiers.
    Tiers(Vec<PriceTier>),
    /// Legacy list of transmission types sharing one flat price.
    LegacyList { types: Vec<String>, price: i64 },
    /// Legacy single transmission with a flat price.
    LegacySingle { transmission: String, price: i64 },
    /// No usable price information.
    Absent,
}

impl PriceShape {
    /// Detect the layout of a record, trying tiers, then the legacy list,
    /// then the legacy single transmission.
    pub fn detect(raw: &RawProduct) -> Self {
        let tiers = raw
            .price_tiers
            .as_deref()
            .map(parse_tiers)
            .unwrap_or_default();
        if !tiers.is_empty() {
            return PriceShape::Tiers(tiers);
        }

        let Some(price) = raw.price.as_ref().and_then(LooseInt::value).filter(|p| *p >= 0) else {
            return PriceShape::Absent;
        };

        match &raw.transmission {
            Some(OneOrMany::Many(types)) => PriceShape::LegacyList {
                types: clean_list(types.iter().cloned()),
                price,
            },
            Some(OneOrMany::One(t)) if !t.trim().is_empty() => PriceShape::LegacySingle {
                transmission: t.trim().to_string(),
                price,
            },
            _ => PriceShape::LegacySingle {
                transmission: DEFAULT_TRANSMISSION.to_string(),
                price,
            },
        }
    }

    /// Whether the record carries any price information.
    pub fn is_present(&self) -> bool {
        !matches!(self, PriceShape::Absent)
    }

    /// Collapse into the canonical tier list.
    pub fn into_tiers(self) -> Vec<PriceTier> {
        match self {
            PriceShape::Tiers(tiers) => tiers,
            PriceShape::LegacyList { types, price } => types
                .into_iter()
                .map(|t| PriceTier::new(t, price))
                .collect(),
            PriceShape::LegacySingle {
                transmission,
                price,
            } => vec![PriceTier::new(transmission, price)],
            PriceShape::Absent => Vec::new(),
        }
    }
}

/// Normalize a raw record into a [`Product`].
///
/// Fails only when the record has no usable identifier.
pub fn normalize(raw: &RawProduct) -> Result<Product, CatalogError> {
    let id = match raw.id.as_ref() {
        None => return Err(CatalogError::MalformedRecord("missing id".to_string())),
        Some(value) => match value.value() {
            Some(id) if id > 0 => ProductId::new(id),
            _ => {
                return Err(CatalogError::MalformedRecord(format!(
                    "unusable id {:?}",
                    value
                )))
            }
        },
    };

    let mut product = Product::new(id, first_text(&[&raw.model, &raw.name]).unwrap_or_default());
    apply_fields(&mut product, raw);
    product.description = first_text(&[&raw.description, &raw.deskripsi]).unwrap_or_default();
    product.price_tiers = PriceShape::detect(raw).into_tiers();
    Ok(product)
}

/// Apply a partial update. Fields present in `patch` replace the current
/// values; absent or malformed fields leave them untouched. The identifier
/// never changes.
pub fn apply_patch(product: &mut Product, patch: &RawProduct) {
    if let Some(model) = patched_text(&[&patch.model, &patch.name]) {
        product.model = model;
    }
    if let Some(description) = patched_text(&[&patch.description, &patch.deskripsi]) {
        product.description = description;
    }
    apply_fields(product, patch);

    let shape = PriceShape::detect(patch);
    if shape.is_present() {
        product.price_tiers = shape.into_tiers();
    }
}

/// Copy every field shared by creation and partial update.
fn apply_fields(product: &mut Product, raw: &RawProduct) {
    if let Some(brand) = &raw.brand {
        product.brand = or_default(brand, DEFAULT_BRAND);
    }
    if let Some(fuel_type) = &raw.fuel_type {
        product.fuel_type = or_default(fuel_type, DEFAULT_FUEL_TYPE);
    }
    if let Some(condition) = &raw.condition {
        product.condition = or_default(condition, DEFAULT_CONDITION);
    }
    if let Some(category) = &raw.category {
        product.category = category.trim().to_string();
    }
    if let Some(year) = int_of(&raw.year) {
        product.year = i32::try_from(year).unwrap_or(0);
    }
    if let Some(mileage) = int_of(&raw.mileage) {
        product.mileage = mileage.max(0);
    }
    if let Some(stock) = int_of(&raw.stock) {
        product.stock = stock.max(0);
    }
    if let Some(colors) = &raw.colors {
        product.colors = clean_list(colors.as_slice().iter().cloned());
    }
    if let Some(images) = &raw.images {
        let mut images = clean_list(images.as_slice().iter().cloned());
        images.truncate(MAX_IMAGES);
        product.images = images;
    }
}

/// Parse tier entries, skipping any without a transmission or a valid price.
fn parse_tiers(entries: &[serde_json::Value]) -> Vec<PriceTier> {
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value::<RawTier>(entry.clone()).ok())
        .filter_map(|tier| {
            let transmission = tier.transmission_type?.trim().to_string();
            let price = tier.price.as_ref().and_then(LooseInt::value)?;
            (!transmission.is_empty() && price >= 0).then(|| PriceTier::new(transmission, price))
        })
        .collect()
}

/// Trim, drop blanks and drop repeats, keeping first-seen order.
fn clean_list(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !cleaned.iter().any(|v| v == value) {
            cleaned.push(value.to_string());
        }
    }
    cleaned
}

fn first_text(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Like [`first_text`], but a field that is present and blank still yields
/// an empty value so a patch can clear it.
fn patched_text(candidates: &[&Option<String>]) -> Option<String> {
    first_text(candidates).or_else(|| {
        candidates
            .iter()
            .any(|c| c.is_some())
            .then(String::new)
    })
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn int_of(value: &Option<LooseInt>) -> Option<i64> {
    value.as_ref().and_then(LooseInt::value)
}
