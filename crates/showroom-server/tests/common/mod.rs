#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use showroom_catalog::catalog::RawProduct;
use showroom_server::config::ServerConfig;
use showroom_server::{build_app_router, AppState};
use showroom_store::MemoryStore;

pub const BOUNDARY: &str = "showroom-test-boundary";

/// The router plus the temporary upload directory it writes to. The
/// directory is removed when this is dropped.
pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
}

/// Build a test `ServerConfig` writing uploads to `upload_dir`.
pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.port = 0;
    config.uploads.dir = upload_dir.path().to_path_buf();
    config.uploads.max_bytes = 1024;
    config
}

/// Records matching the bundled seed file.
pub fn seed_products() -> Vec<RawProduct> {
    let seed: Value =
        serde_json::from_str(include_str!("../../data/seed.json")).expect("seed is valid JSON");
    serde_json::from_value(seed["products"].clone()).expect("seed products parse")
}

/// Build the full application router over the seeded store.
pub fn build_test_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let config = test_config(&upload_dir);
    let state = AppState::new(MemoryStore::with_products(seed_products()), config);
    let router = build_app_router(state).expect("router builds");
    TestApp { router, upload_dir }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request is served")
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &TestApp, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// A file part for [`send_multipart`]: field name, file name, content type, data.
pub type Part<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

pub async fn send_multipart(app: &TestApp, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let mut body = Vec::new();
    for (field, file_name, content_type, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body is readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is JSON")
}

/// Ids of the items in a listing response.
pub fn listed_ids(listing: &Value) -> Vec<i64> {
    listing["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["id"].as_i64().expect("numeric id"))
        .collect()
}
