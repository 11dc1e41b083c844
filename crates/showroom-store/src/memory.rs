//! In-memory store guarded by a read-write lock.

use crate::file::StoreFile;
use crate::StoreError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use showroom_catalog::catalog::{
    apply_patch, normalize, BusinessScope, Product, Promotion, PromotionDraft, PromotionPatch,
    RawProduct,
};
use showroom_catalog::search::{build_listing, Criteria, Listing};
use showroom_catalog::{CatalogError, ProductId, PromotionId};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;

/// Where the store reads its initial data and writes its snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file loaded when no snapshot exists yet.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    /// JSON file rewritten after every mutation. Preferred over the seed on
    /// startup when it exists.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct Inner {
    /// Stored records in insertion order. Records are kept even when they
    /// cannot be normalized, so listings can report them.
    products: Vec<RawProduct>,
    promotions: Vec<Promotion>,
    /// `None` once the id range is used up.
    next_product: Option<ProductId>,
    next_promotion: Option<PromotionId>,
}

impl Default for Inner {
    fn default() -> Self {
        Self::from_file(StoreFile::default())
    }
}

impl Inner {
    fn from_file(file: StoreFile) -> Self {
        let products = unique_by_id(file.products, "product", RawProduct::id_value);
        let promotions =
            unique_by_id(file.promotions, "promotion", |p: &Promotion| Some(p.id.get()));

        let last_product = products
            .iter()
            .filter_map(RawProduct::id_value)
            .fold(0, i64::max);
        let last_promotion = promotions
            .iter()
            .map(|p| p.id.get())
            .fold(0, i64::max);

        Self {
            products,
            promotions,
            next_product: ProductId::new(last_product).next(),
            next_promotion: PromotionId::new(last_promotion).next(),
        }
    }

    fn to_file(&self) -> StoreFile {
        StoreFile {
            products: self.products.clone(),
            promotions: self.promotions.clone(),
        }
    }

    fn take_product_id(&mut self) -> Result<ProductId, StoreError> {
        let id = self.next_product.ok_or(StoreError::IdsExhausted { entity: "product" })?;
        self.next_product = id.next();
        Ok(id)
    }

    fn take_promotion_id(&mut self) -> Result<PromotionId, StoreError> {
        let id = self
            .next_promotion
            .ok_or(StoreError::IdsExhausted { entity: "promotion" })?;
        self.next_promotion = id.next();
        Ok(id)
    }

    fn product_index(&self, id: ProductId) -> Result<usize, StoreError> {
        self.products
            .iter()
            .position(|raw| raw.id_value() == Some(id.get()))
            .ok_or_else(|| StoreError::product(id.get()))
    }

    fn promotion_index(&self, id: PromotionId) -> Result<usize, StoreError> {
        self.promotions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::promotion(id.get()))
    }
}

/// Product and promotion storage.
///
/// Reads take a shared lock and clone what they return. Writes take the
/// exclusive lock and change a staged copy of the state; the copy replaces
/// the live state only after the snapshot, when one is configured, has been
/// written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create an empty store that is never persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given records.
    pub fn with_products(products: Vec<RawProduct>) -> Self {
        Self {
            inner: RwLock::new(Inner::from_file(StoreFile {
                products,
                promotions: Vec::new(),
            })),
            snapshot_path: None,
        }
    }

    /// Open a store from configuration.
    ///
    /// Loads the snapshot if it exists, otherwise the seed, otherwise
    /// starts empty.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let snapshot = config.snapshot_path.as_ref().filter(|p| p.exists());
        let file = match (snapshot, config.seed_path.as_ref()) {
            (Some(path), _) | (None, Some(path)) => StoreFile::load(path)?,
            (None, None) => StoreFile::default(),
        };

        tracing::info!(
            products = file.products.len(),
            promotions = file.promotions.len(),
            "Store opened"
        );

        Ok(Self {
            inner: RwLock::new(Inner::from_file(file)),
            snapshot_path: config.snapshot_path.clone(),
        })
    }

    fn persist(&self, inner: &Inner) -> Result<(), StoreError> {
        match &self.snapshot_path {
            Some(path) => inner.to_file().save(path),
            None => Ok(()),
        }
    }

    fn commit(&self, live: &mut Inner, staged: Inner) -> Result<(), StoreError> {
        self.persist(&staged)?;
        *live = staged;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Raw records inside the business scope, in storage order.
    pub fn scoped_products(&self, scope: &BusinessScope) -> Result<Vec<RawProduct>, StoreError> {
        let inner = self.inner.read()?;
        Ok(inner
            .products
            .iter()
            .filter(|raw| scope.admits(raw))
            .cloned()
            .collect())
    }

    /// Catalog listing of the scoped records.
    pub fn listing(
        &self,
        scope: &BusinessScope,
        criteria: &Criteria,
    ) -> Result<Listing, StoreError> {
        let records = self.scoped_products(scope)?;
        Ok(build_listing(&records, criteria))
    }

    /// Normalized product by id, regardless of scope.
    pub fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        let inner = self.inner.read()?;
        let index = inner.product_index(id)?;
        Ok(normalize(&inner.products[index])?)
    }

    /// Store a new product under the next serial id.
    ///
    /// The input is normalized on write, so legacy price shapes are stored
    /// as tiers.
    pub fn create_product(&self, input: RawProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write()?;
        let mut staged = inner.clone();
        let id = staged.take_product_id()?;
        let product = normalize(&input.with_id(id.get()))?;
        require_model(&product)?;

        staged.products.push(RawProduct::from(&product));
        self.commit(&mut inner, staged)?;

        tracing::info!(product_id = %id, model = %product.model, "Product created");
        Ok(product)
    }

    /// Apply a partial update to a product.
    pub fn update_product(&self, id: ProductId, patch: RawProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write()?;
        let index = inner.product_index(id)?;
        let mut product = normalize(&inner.products[index])?;
        apply_patch(&mut product, &patch);
        require_model(&product)?;

        let mut staged = inner.clone();
        staged.products[index] = RawProduct::from(&product);
        self.commit(&mut inner, staged)?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Remove a product, returning the raw record that was stored.
    pub fn delete_product(&self, id: ProductId) -> Result<RawProduct, StoreError> {
        let mut inner = self.inner.write()?;
        let index = inner.product_index(id)?;
        let mut staged = inner.clone();
        let removed = staged.products.remove(index);
        self.commit(&mut inner, staged)?;

        tracing::info!(product_id = %id, "Product deleted");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Promotions
    // ------------------------------------------------------------------

    /// All promotions, newest first.
    pub fn promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        let inner = self.inner.read()?;
        let mut promotions = inner.promotions.clone();
        promotions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(promotions)
    }

    /// Promotion by id.
    pub fn promotion(&self, id: PromotionId) -> Result<Promotion, StoreError> {
        let inner = self.inner.read()?;
        let index = inner.promotion_index(id)?;
        Ok(inner.promotions[index].clone())
    }

    /// Validate and store a new promotion.
    pub fn create_promotion(&self, draft: PromotionDraft) -> Result<Promotion, StoreError> {
        let mut inner = self.inner.write()?;
        let mut staged = inner.clone();
        let id = staged.take_promotion_id()?;
        let promotion = draft.into_promotion(id, Utc::now())?;

        staged.promotions.push(promotion.clone());
        self.commit(&mut inner, staged)?;

        tracing::info!(promotion_id = %id, title = %promotion.title, "Promotion created");
        Ok(promotion)
    }

    /// Apply a partial update to a promotion.
    pub fn update_promotion(
        &self,
        id: PromotionId,
        patch: PromotionPatch,
    ) -> Result<Promotion, StoreError> {
        let mut inner = self.inner.write()?;
        let index = inner.promotion_index(id)?;
        let mut staged = inner.clone();
        patch.apply(&mut staged.promotions[index])?;
        let promotion = staged.promotions[index].clone();
        self.commit(&mut inner, staged)?;

        tracing::info!(promotion_id = %id, "Promotion updated");
        Ok(promotion)
    }

    /// Remove a promotion, returning it so the caller can release its image.
    pub fn delete_promotion(&self, id: PromotionId) -> Result<Promotion, StoreError> {
        let mut inner = self.inner.write()?;
        let index = inner.promotion_index(id)?;
        let mut staged = inner.clone();
        let removed = staged.promotions.remove(index);
        self.commit(&mut inner, staged)?;

        tracing::info!(promotion_id = %id, "Promotion deleted");
        Ok(removed)
    }
}

/// Keep the first record for each id. Records without a usable id are kept
/// so listings can report them.
fn unique_by_id<T>(records: Vec<T>, entity: &str, id_of: impl Fn(&T) -> Option<i64>) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .enumerate()
        .filter(|(index, record)| match id_of(record) {
            Some(id) if !seen.insert(id) => {
                tracing::warn!(entity, id, index, "Dropping record with duplicate id");
                false
            }
            _ => true,
        })
        .map(|(_, record)| record)
        .collect()
}

fn require_model(product: &Product) -> Result<(), CatalogError> {
    if product.model.trim().is_empty() {
        return Err(CatalogError::Validation("product model is required".to_string()));
    }
    Ok(())
}
