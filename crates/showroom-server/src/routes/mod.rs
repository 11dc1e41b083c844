pub mod admin;
pub mod health;
pub mod info;
pub mod products;
pub mod promotions;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::UploadConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /mobil                 list, create
/// /mobil/upload          image upload (multipart `images`)
/// /mobil/{id}            get, update, delete
/// /jenis                 category facet
/// /warna                 color facet
///
/// /promo                 list, create
/// /promo/upload          image upload (multipart `image`)
/// /promo/{id}            get, update, delete
///
/// /admin/login           static credential check
/// ```
pub fn api_routes(uploads: &UploadConfig) -> Router<AppState> {
    let upload_limit = DefaultBodyLimit::max(uploads.body_limit());

    Router::new()
        .route(
            "/mobil",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/mobil/upload",
            post(products::upload_images).layer(upload_limit.clone()),
        )
        .route(
            "/mobil/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/jenis", get(products::categories))
        .route("/warna", get(products::colors))
        .route(
            "/promo",
            get(promotions::list_promotions).post(promotions::create_promotion),
        )
        .route(
            "/promo/upload",
            post(promotions::upload_image).layer(upload_limit),
        )
        .route(
            "/promo/{id}",
            get(promotions::get_promotion)
                .put(promotions::update_promotion)
                .delete(promotions::delete_promotion),
        )
        .route("/admin/login", post(admin::login))
}
