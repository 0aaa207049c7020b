use std::net::SocketAddr;

use settlement_engine::api::{AppState, create_router};
use settlement_engine::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/clt";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_dir =
        std::env::var("SETTLEMENT_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr: SocketAddr = std::env::var("SETTLEMENT_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    tracing::info!(
        statute = %config.statute().code,
        version = %config.statute().version,
        config_dir = %config_dir,
        "Loaded statutory configuration"
    );

    let app = create_router(AppState::new(config));

    tracing::info!("Settlement engine listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
