//! Entry point for the Cooler Engine binary.
//!
//! Running this binary will start an HTTP server that exposes the
//! profit estimator.  Business parameters may be overridden with a
//! JSON file named by the `COOLER_PARAMS_FILE` environment variable;
//! the bind address comes from `COOLER_BIND_ADDR`.  Log verbosity is
//! controlled through `RUST_LOG`.

use cooler_engine::config::{Config, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .init();

    let config = Config::from_env();
    if let Err(err) = cooler_engine::api::serve(&config).await {
        tracing::error!("Error running server: {err:#}");
    }
}
