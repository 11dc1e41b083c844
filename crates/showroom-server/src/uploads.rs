//! Image uploads stored on the local filesystem.
//!
//! Files are written to the configured upload directory and served back
//! under [`URL_PREFIX`].

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use chrono::Utc;

use crate::config::UploadConfig;
use crate::error::{ApiError, ApiResult};

/// URL path the upload directory is served under.
pub const URL_PREFIX: &str = "/uploads/";

/// Accepted image content types.
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/jpg"];

/// A file received in a multipart request, not yet written.
#[derive(Debug)]
pub struct PendingFile {
    pub original_name: Option<String>,
    pub data: Vec<u8>,
}

/// Check an uploaded file's declared content type and size.
pub fn check_image(content_type: Option<&str>, len: usize, max_bytes: usize) -> ApiResult<()> {
    let content_type = content_type.unwrap_or_default();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(ApiError::BadRequest(format!(
            "Only JPEG images are allowed, got {content_type:?}"
        )));
    }
    if len > max_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "File is {len} bytes, the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Build a unique stored name: `<prefix>-<millis>-<random><ext>`.
///
/// The extension is taken from the original file name, defaulting to `.jpg`.
pub fn stored_name(prefix: &str, original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| ".jpg".to_string());

    format!(
        "{prefix}-{}-{}{ext}",
        Utc::now().timestamp_millis(),
        rand::random_range(0..1_000_000_000u32)
    )
}

/// Read every file sent under `field`, validating each one.
///
/// Other fields are ignored. Nothing is written to disk here, so a request
/// with one bad file stores none of them.
pub async fn collect_files(
    multipart: &mut Multipart,
    field: &str,
    max_files: usize,
    config: &UploadConfig,
) -> ApiResult<Vec<PendingFile>> {
    let mut files = Vec::new();

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        if files.len() == max_files {
            return Err(ApiError::BadRequest(format!(
                "At most {max_files} file(s) may be uploaded at once"
            )));
        }

        let content_type = part.content_type().map(str::to_string);
        let original_name = part.file_name().map(str::to_string);
        let data = part
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        check_image(content_type.as_deref(), data.len(), config.max_bytes)?;
        files.push(PendingFile {
            original_name,
            data: data.to_vec(),
        });
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("No file was uploaded".to_string()));
    }
    Ok(files)
}

/// Write files to the upload directory and return their public URLs.
pub async fn store_files(
    dir: &Path,
    prefix: &str,
    files: Vec<PendingFile>,
) -> ApiResult<Vec<String>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let name = stored_name(prefix, file.original_name.as_deref());
        tokio::fs::write(dir.join(&name), &file.data).await?;
        tracing::debug!(file = %name, bytes = file.data.len(), "Stored upload");
        urls.push(format!("{URL_PREFIX}{name}"));
    }
    Ok(urls)
}

/// Local path of an upload URL, if it points into the upload directory.
pub fn local_path(dir: &Path, url: &str) -> Option<PathBuf> {
    let name = url.strip_prefix(URL_PREFIX)?;
    let is_plain_name = !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != "..";
    is_plain_name.then(|| dir.join(name))
}

/// Delete the file behind an upload URL. Missing files and foreign URLs are
/// ignored.
pub async fn remove_upload(dir: &Path, url: &str) {
    let Some(path) = local_path(dir, url) else {
        return;
    };
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::info!(path = %path.display(), "Removed upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload"),
    }
}
