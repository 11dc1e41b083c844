//! JSON seed and snapshot files.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use showroom_catalog::catalog::{Promotion, RawProduct};
use std::fs;
use std::path::Path;

/// Everything the store holds, as written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFile {
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

/// Seeds may be a full store file or a bare list of products.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Products(Vec<RawProduct>),
    Store(StoreFile),
}

impl StoreFile {
    /// Read a seed or snapshot file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let file = match serde_json::from_str(&content)? {
            SeedFile::Products(products) => StoreFile {
                products,
                promotions: Vec::new(),
            },
            SeedFile::Store(file) => file,
        };
        tracing::debug!(
            path = %path.display(),
            products = file.products.len(),
            promotions = file.promotions.len(),
            "Loaded store file"
        );
        Ok(file)
    }

    /// Write the file, replacing any previous content.
    ///
    /// The content goes to a sibling temporary file first and is then
    /// renamed over the target.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_bare_product_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(&path, r#"[{"id": 1, "model": "Avanza"}, {"id": 2}]"#).unwrap();

        let file = StoreFile::load(&path).unwrap();
        assert_eq!(file.products.len(), 2);
        assert!(file.promotions.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        let file = StoreFile {
            products: vec![RawProduct::default().with_id(3)],
            promotions: Vec::new(),
        };

        file.save(&path).unwrap();
        let loaded = StoreFile::load(&path).unwrap();
        assert_eq!(loaded.products, file.products);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            StoreFile::load(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
