//! Promotions shown next to the catalog.

use crate::error::CatalogError;
use crate::ids::PromotionId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A time-boxed promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: PromotionId,
    pub title: String,
    pub description: Option<String>,
    /// Image reference (upload URL).
    pub image: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Promotion {
    /// Whether the promotion runs on the given day. Open ends are unbounded.
    pub fn is_running_on(&self, day: NaiveDate) -> bool {
        self.starts_on.map_or(true, |start| start <= day)
            && self.ends_on.map_or(true, |end| day <= end)
    }
}

/// Fields submitted to create a promotion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDraft {
    #[serde(default, alias = "judul")]
    pub title: Option<String>,
    #[serde(default, alias = "deskripsi")]
    pub description: Option<String>,
    #[serde(default, alias = "gambar")]
    pub image: Option<String>,
    #[serde(default, alias = "tanggalAwal", deserialize_with = "blank_date")]
    pub starts_on: Option<NaiveDate>,
    #[serde(default, alias = "tanggalAkhir", deserialize_with = "blank_date")]
    pub ends_on: Option<NaiveDate>,
}

impl PromotionDraft {
    /// Validate and build the promotion.
    pub fn into_promotion(
        self,
        id: PromotionId,
        created_at: DateTime<Utc>,
    ) -> Result<Promotion, CatalogError> {
        let title = required(self.title, "title")?;
        let image = required(self.image, "image")?;
        let promotion = Promotion {
            id,
            title,
            description: optional(self.description),
            image,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            created_at,
        };
        check_dates(&promotion)?;
        Ok(promotion)
    }
}

/// Partial update of a promotion.
///
/// Date fields distinguish "absent" (keep) from "blank" (clear).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionPatch {
    #[serde(default, alias = "judul")]
    pub title: Option<String>,
    #[serde(default, alias = "deskripsi")]
    pub description: Option<String>,
    #[serde(default, alias = "gambar")]
    pub image: Option<String>,
    #[serde(default, alias = "tanggalAwal", deserialize_with = "present_date")]
    pub starts_on: Option<Option<NaiveDate>>,
    #[serde(default, alias = "tanggalAkhir", deserialize_with = "present_date")]
    pub ends_on: Option<Option<NaiveDate>>,
}

impl PromotionPatch {
    /// Apply onto an existing promotion. Nothing changes on error.
    pub fn apply(self, promotion: &mut Promotion) -> Result<(), CatalogError> {
        let mut updated = promotion.clone();
        if self.title.is_some() {
            updated.title = required(self.title, "title")?;
        }
        if self.image.is_some() {
            updated.image = required(self.image, "image")?;
        }
        if let Some(description) = self.description {
            updated.description = optional(Some(description));
        }
        if let Some(starts_on) = self.starts_on {
            updated.starts_on = starts_on;
        }
        if let Some(ends_on) = self.ends_on {
            updated.ends_on = ends_on;
        }
        check_dates(&updated)?;
        *promotion = updated;
        Ok(())
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, CatalogError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CatalogError::Validation(format!("promotion {field} is required")))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_dates(promotion: &Promotion) -> Result<(), CatalogError> {
    match (promotion.starts_on, promotion.ends_on) {
        (Some(start), Some(end)) if end < start => Err(CatalogError::Validation(format!(
            "promotion ends on {end} before it starts on {start}"
        ))),
        _ => Ok(()),
    }
}

/// Read an ISO date; null and blank strings mean no date.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        // Accept full timestamps by keeping the date part.
        Some(s) => NaiveDate::parse_from_str(s.split('T').next().unwrap_or(s), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn present_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_date(deserializer).map(Some)
}
