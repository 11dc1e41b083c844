//! Fixed business scope of the public catalog.

use crate::catalog::product::{DEFAULT_BRAND, DEFAULT_CONDITION};
use crate::catalog::RawProduct;
use serde::{Deserialize, Serialize};

/// The brand and condition the public catalog is limited to.
///
/// This is not a user-facing filter: it is decided by configuration and
/// applied by the data source before records reach the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessScope {
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_condition")]
    pub condition: String,
}

impl Default for BusinessScope {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            condition: default_condition(),
        }
    }
}

impl BusinessScope {
    /// Create a scope for a brand and condition.
    pub fn new(brand: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            condition: condition.into(),
        }
    }

    /// Whether a stored record falls inside the scope. Records without a
    /// brand or condition are read with the storage defaults.
    pub fn admits(&self, raw: &RawProduct) -> bool {
        field_or(&raw.brand, DEFAULT_BRAND) == self.brand
            && field_or(&raw.condition, DEFAULT_CONDITION) == self.condition
    }
}

fn field_or<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn default_brand() -> String {
    DEFAULT_BRAND.to_string()
}

fn default_condition() -> String {
    DEFAULT_CONDITION.to_string()
}
