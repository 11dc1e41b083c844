use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use showroom_catalog::CatalogError;
use showroom_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the catalog and store errors and adds HTTP-specific variants.
/// Renders as `{ "message": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A catalog rule rejected the request.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A storage error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An uploaded file exceeds the size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Catalog(err) => classify_catalog_error(err),
            ApiError::Store(err) => match err {
                StoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                StoreError::Catalog(err) => classify_catalog_error(err),
                other => internal(other),
            },
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            ApiError::Internal(msg) => internal(msg),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_catalog_error(err: &CatalogError) -> (StatusCode, &'static str, String) {
    match err {
        CatalogError::InvalidCriteria { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_CRITERIA", err.to_string())
        }
        CatalogError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CatalogError::MalformedRecord(_) | CatalogError::Serialization(_) => internal(err),
    }
}

fn internal(err: impl std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
