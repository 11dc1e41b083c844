//! Server configuration.
//!
//! Loaded from an optional TOML (or JSON) file, then overridden by
//! environment variables. Every field has a default suitable for local
//! development.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use showroom_catalog::catalog::BusinessScope;
use showroom_store::StoreConfig;

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default: `5000`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub log: LogConfig,

    /// Brand and condition the public catalog is limited to.
    #[serde(default)]
    pub scope: BusinessScope,

    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub uploads: UploadConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            log: LogConfig::default(),
            scope: BusinessScope::default(),
            admin: AdminConfig::default(),
            uploads: UploadConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Load from an optional file and apply environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment variables.
    ///
    /// | Env Var          | Field              |
    /// |------------------|--------------------|
    /// | `HOST`           | `host`             |
    /// | `PORT`           | `port`             |
    /// | `CORS_ORIGINS`   | `cors_origins`     |
    /// | `ADMIN_USERNAME` | `admin.username`   |
    /// | `ADMIN_PASSWORD` | `admin.password`   |
    /// | `UPLOAD_DIR`     | `uploads.dir`      |
    /// | `LOG_FORMAT`     | `log.format`       |
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?;
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(username) = var("ADMIN_USERNAME") {
            self.admin.username = username;
        }
        if let Some(password) = var("ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        if let Some(dir) = var("UPLOAD_DIR") {
            self.uploads.dir = PathBuf::from(dir);
        }
        if let Some(format) = var("LOG_FORMAT") {
            self.log.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                other => anyhow::bail!("LOG_FORMAT must be json or pretty, got {other:?}"),
            };
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_filter() -> String {
    "showroom_server=debug,showroom_store=info,showroom_catalog=info,tower_http=debug".to_string()
}

/// Static administrator credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: default_admin_password(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

/// Image upload limits and location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory files are written to and served from under `/uploads`.
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// Maximum size of a single file in bytes (default: 5 MiB).
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Maximum number of files in one product upload (default: 10).
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_bytes: default_max_bytes(),
            max_files: default_max_files(),
        }
    }
}

impl UploadConfig {
    /// Largest request body an upload route accepts.
    pub fn body_limit(&self) -> usize {
        // Headroom for multipart boundaries and field headers.
        self.max_bytes
            .saturating_mul(self.max_files)
            .saturating_add(64 * 1024)
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_max_files() -> usize {
    10
}
