//! HTTP API for the showroom vehicle catalog.
//!
//! The binary in `main.rs` wires configuration, logging and the store
//! together; everything else lives here so integration tests can build the
//! same router.

pub mod config;
pub mod error;
pub mod logging;
pub mod router;
pub mod routes;
pub mod state;
pub mod uploads;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_app_router;
pub use state::AppState;
