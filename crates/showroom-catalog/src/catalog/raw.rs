//! Loosely-typed product records as they come out of storage or an admin form.
//!
//! Every field is optional and tolerant: a value of the wrong type is read as
//! absent instead of failing the whole record. Field names accept both the
//! current English spelling and the legacy column names.

use crate::catalog::Product;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Either a single value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flatten into a list, wrapping a single value.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        }
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => std::slice::from_ref(value),
        }
    }
}

/// An integer that may arrive as a number or as numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    /// Integer value, if one can be read.
    pub fn value(&self) -> Option<i64> {
        match self {
            LooseInt::Int(i) => Some(*i),
            LooseInt::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            LooseInt::Float(_) => None,
            LooseInt::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<i64> for LooseInt {
    fn from(v: i64) -> Self {
        LooseInt::Int(v)
    }
}

/// A product record before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<LooseInt>,

    #[serde(
        default,
        alias = "merk",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Legacy display name, used when `model` is blank.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        alias = "tahun",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<LooseInt>,

    #[serde(
        default,
        alias = "kilometer",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub mileage: Option<LooseInt>,

    #[serde(
        default,
        alias = "warna",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub colors: Option<OneOrMany<String>>,

    /// Current price shape: a list of `{transmissionType, price}` objects.
    /// Entries are kept as raw JSON and validated one by one.
    #[serde(
        default,
        alias = "transmisiHarga",
        alias = "transmisi_harga",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_tiers: Option<Vec<serde_json::Value>>,

    /// Legacy transmission field: one type or a list of types.
    #[serde(
        default,
        alias = "transmissionTypes",
        alias = "transmisi",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub transmission: Option<OneOrMany<String>>,

    /// Legacy flat price shared by every transmission.
    #[serde(
        default,
        alias = "harga",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<LooseInt>,

    #[serde(
        default,
        alias = "bahanBakar",
        alias = "bahan_bakar",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel_type: Option<String>,

    #[serde(
        default,
        alias = "kondisi",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<String>,

    #[serde(
        default,
        alias = "jenis",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Legacy description column, used when `description` is blank.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,

    #[serde(
        default,
        alias = "gambar",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub images: Option<OneOrMany<String>>,

    #[serde(
        default,
        alias = "stok",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub stock: Option<LooseInt>,
}

impl RawProduct {
    /// Parse a record from a JSON value.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(LooseInt::Int(id));
        self
    }

    /// Identifier, if present and numeric.
    pub fn id_value(&self) -> Option<i64> {
        self.id.as_ref().and_then(LooseInt::value)
    }
}

/// A tier entry as written in storage.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawTier {
    #[serde(default, alias = "type", deserialize_with = "lenient")]
    pub transmission_type: Option<String>,
    #[serde(default, alias = "harga", deserialize_with = "lenient")]
    pub price: Option<LooseInt>,
}

impl From<&Product> for RawProduct {
    fn from(product: &Product) -> Self {
        let tiers = product
            .price_tiers
            .iter()
            .filter_map(|t| serde_json::to_value(t).ok())
            .collect();

        Self {
            id: Some(LooseInt::Int(product.id.get())),
            brand: Some(product.brand.clone()),
            model: Some(product.model.clone()),
            year: Some(LooseInt::Int(i64::from(product.year))),
            mileage: Some(LooseInt::Int(product.mileage)),
            colors: Some(OneOrMany::Many(product.colors.clone())),
            price_tiers: Some(tiers),
            fuel_type: Some(product.fuel_type.clone()),
            condition: Some(product.condition.clone()),
            category: Some(product.category.clone()),
            description: Some(product.description.clone()),
            images: Some(OneOrMany::Many(product.images.clone())),
            stock: Some(LooseInt::Int(product.stock)),
            ..Default::default()
        }
    }
}

/// Deserialize a field, reading any value of the wrong shape as `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
