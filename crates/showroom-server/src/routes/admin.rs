use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/admin/login
///
/// Compares against the configured static credentials. No session is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let admin = &state.config.admin;
    if input.username == admin.username && input.password == admin.password {
        tracing::info!(username = %input.username, "Admin login succeeded");
        (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Login successful" })),
        )
    } else {
        tracing::warn!(username = %input.username, "Admin login rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid username or password" })),
        )
    }
}
