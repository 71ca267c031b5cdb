//! HTTP server for the labor cost engine.
//!
//! # Environment Variables
//!
//! - `LABOR_ENGINE_CONFIG`: configuration directory (default `config/default`)
//! - `LABOR_ENGINE_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::net::SocketAddr;

use labor_engine::api::{AppState, create_router};
use labor_engine::config::ConfigLoader;
use labor_engine::logging;

const DEFAULT_CONFIG_DIR: &str = "config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config_dir =
        std::env::var("LABOR_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                config_dir = %config_dir,
                error = %err,
                "Falling back to built-in pay rules and on-cost rates"
            );
            ConfigLoader::defaults()
        }
    };

    let addr: SocketAddr = std::env::var("LABOR_ENGINE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let app = create_router(AppState::new(config));

    tracing::info!(%addr, "Labor cost engine listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
