pub mod billing;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod route;
pub mod server;
pub mod signals;
pub mod store;
pub mod validation;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ServerConfig;

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `server.log_level`. Can only be called
/// once per process.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if server.log_format == "json" {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
