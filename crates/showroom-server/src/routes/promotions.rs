use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use showroom_catalog::catalog::{Promotion, PromotionDraft, PromotionPatch};
use showroom_catalog::PromotionId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::uploads;

/// Stored name prefix for promotion images.
const IMAGE_PREFIX: &str = "promo";

/// GET /api/promo -- newest first.
pub async fn list_promotions(State(state): State<AppState>) -> ApiResult<Json<Vec<Promotion>>> {
    Ok(Json(state.store.promotions()?))
}

/// GET /api/promo/{id}
pub async fn get_promotion(
    State(state): State<AppState>,
    Path(id): Path<PromotionId>,
) -> ApiResult<Json<Promotion>> {
    Ok(Json(state.store.promotion(id)?))
}

/// POST /api/promo
pub async fn create_promotion(
    State(state): State<AppState>,
    Json(draft): Json<PromotionDraft>,
) -> ApiResult<(StatusCode, Json<Promotion>)> {
    let promotion = state
        .write_store(move |store| store.create_promotion(draft))
        .await?;
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// PUT /api/promo/{id}
pub async fn update_promotion(
    State(state): State<AppState>,
    Path(id): Path<PromotionId>,
    Json(patch): Json<PromotionPatch>,
) -> ApiResult<Json<Promotion>> {
    let promotion = state
        .write_store(move |store| store.update_promotion(id, patch))
        .await?;
    Ok(Json(promotion))
}

/// DELETE /api/promo/{id}
///
/// Also removes the promotion's image when it was uploaded here.
pub async fn delete_promotion(
    State(state): State<AppState>,
    Path(id): Path<PromotionId>,
) -> ApiResult<Json<Value>> {
    let removed = state
        .write_store(move |store| store.delete_promotion(id))
        .await?;
    uploads::remove_upload(&state.config.uploads.dir, &removed.image).await;
    Ok(Json(json!({ "message": format!("Promotion {id} deleted") })))
}

/// POST /api/promo/upload
///
/// Multipart form with a single JPEG file under `image`.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let config = &state.config.uploads;
    let files = uploads::collect_files(&mut multipart, "image", 1, config).await?;
    let url = uploads::store_files(&config.dir, IMAGE_PREFIX, files)
        .await?
        .pop()
        .ok_or_else(|| ApiError::Internal("upload produced no file".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Image uploaded",
        "image": url,
    })))
}
