//! payslip-engine server
//!
//! Loads configuration from `PAYSLIP_CONFIG_DIR` (default `./config/default`),
//! seeds an empty store and serves the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::clock::SystemClock;
use payslip_engine::config::ConfigLoader;
use payslip_engine::service::PayrollEngine;
use payslip_engine::store::MemoryStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payslip_engine=info".into()),
        )
        .init();

    let config_dir = std::env::var("PAYSLIP_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let loader = ConfigLoader::load(&config_dir)?;
    let seed = ConfigLoader::load_seed(config_dir.join("seed.yaml"))?;

    let engine = PayrollEngine::new(
        Arc::new(MemoryStore::new()),
        Arc::new(SystemClock),
        loader.policy().clone(),
    );
    engine.seed(&seed)?;

    let app = create_router(AppState::new(engine));

    let addr = loader.server().bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("payslip-engine listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
