pub mod app;
pub mod config;
mod error;
pub mod kit_client;
pub mod utils;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use kit_client::KitClient;

use tracing_subscriber::EnvFilter;

/// Console tracing for local development: everything at `debug` unless
/// overridden with `RUST_LOG`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug,hyper=info")),
        )
        .init();
}

/// Tracing for production builds, defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
