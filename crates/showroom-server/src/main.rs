//! Showroom server - HTTP API for the vehicle catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use showroom_server::config::ServerConfig;
use showroom_server::{build_app_router, logging, AppState};
use showroom_store::MemoryStore;

/// Serve the showroom catalog API
#[derive(Parser)]
#[command(name = "showroom-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (TOML, or JSON by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides the config file and HOST
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the config file and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = ServerConfig::resolve(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    // --- Tracing ---
    logging::init(&config.log);
    tracing::info!(
        host = %config.host,
        port = config.port,
        scope_brand = %config.scope.brand,
        scope_condition = %config.scope.condition,
        "Loaded server configuration"
    );

    // --- Store ---
    let store = MemoryStore::open(&config.store).context("Failed to open store")?;
    tokio::fs::create_dir_all(&config.uploads.dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.uploads.dir.display()
            )
        })?;

    // --- Router ---
    let addr = config.bind_addr()?;
    let app = build_app_router(AppState::new(store, config))?;

    // --- Start server ---
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
