use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use showroom_catalog::catalog::{Product, RawProduct};
use showroom_catalog::search::{Criteria, Listing};
use showroom_catalog::ProductId;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::uploads;

/// Stored name prefix for product images.
const IMAGE_PREFIX: &str = "mobil";

/// GET /api/mobil
///
/// Lists the scoped catalog. Accepts both the current and the legacy query
/// keys; see [`Criteria::from_pairs`].
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Listing>> {
    let criteria = Criteria::from_pairs(params)?;
    let listing = state.store.listing(&state.config.scope, &criteria)?;
    Ok(Json(listing))
}

/// GET /api/mobil/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.product(id)?))
}

/// POST /api/mobil
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<RawProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state
        .write_store(move |store| store.create_product(input))
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/mobil/{id}
///
/// Partial update: only the fields present in the body change.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<RawProduct>,
) -> ApiResult<Json<Product>> {
    let product = state
        .write_store(move |store| store.update_product(id, patch))
        .await?;
    Ok(Json(product))
}

/// DELETE /api/mobil/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Value>> {
    state
        .write_store(move |store| store.delete_product(id))
        .await?;
    Ok(Json(json!({ "message": format!("Product {id} deleted") })))
}

/// POST /api/mobil/upload
///
/// Multipart form with up to `uploads.max_files` JPEG files under `images`.
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let config = &state.config.uploads;
    let files = uploads::collect_files(&mut multipart, "images", config.max_files, config).await?;
    let urls = uploads::store_files(&config.dir, IMAGE_PREFIX, files).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} image(s) uploaded", urls.len()),
        "images": urls,
    })))
}

/// GET /api/jenis -- distinct categories of the scoped catalog.
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let listing = state.store.listing(&state.config.scope, &Criteria::new())?;
    Ok(Json(listing.facets.categories))
}

/// GET /api/warna -- distinct colors of the scoped catalog.
pub async fn colors(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let listing = state.store.listing(&state.config.scope, &Criteria::new())?;
    Ok(Json(listing.facets.colors))
}
