use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / -- service name, version and the endpoint map.
async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Showroom catalog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "listProducts": "GET /api/mobil",
            "getProduct": "GET /api/mobil/{id}",
            "createProduct": "POST /api/mobil",
            "updateProduct": "PUT /api/mobil/{id}",
            "deleteProduct": "DELETE /api/mobil/{id}",
            "uploadImages": "POST /api/mobil/upload",
            "categories": "GET /api/jenis",
            "colors": "GET /api/warna",
            "listPromotions": "GET /api/promo",
            "getPromotion": "GET /api/promo/{id}",
            "createPromotion": "POST /api/promo",
            "updatePromotion": "PUT /api/promo/{id}",
            "deletePromotion": "DELETE /api/promo/{id}",
            "uploadPromotionImage": "POST /api/promo/upload",
            "adminLogin": "POST /api/admin/login"
        }
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}
