//! Attendance server binary.
//!
//! Loads the YAML configuration named by `ATTENDANCE_CONFIG` (default
//! `./config/attendance.yaml`), installs the tracing subscriber and serves
//! the HTTP API.

use anyhow::Context;
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "./config/attendance.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path =
        std::env::var("ATTENDANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigLoader::load(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;
    info!(
        path = %config_path,
        default_wage = %config.config().default_hourly_wage,
        utc_offset_minutes = config.config().utc_offset_minutes,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).context("failed to initialise state")?;
    let router = create_router(state);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "Server listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
