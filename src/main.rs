mod azure;
mod config;
mod error;
mod logging;
mod pipeline;
mod routes;
mod state;
mod translate;
mod vision;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use tracing::info;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init(logging::json_requested());

    let explicit = std::env::var("CONFIG_PATH").ok();
    let (config, loaded_path) = config::load_first(explicit.as_deref(), config::DEFAULT_PATHS)
        .context("Failed to load configuration")?;
    info!("Loaded configuration from: {}", loaded_path);

    let host = config.system_config.host.clone();
    let port = config.system_config.port;

    let app_state = AppState::new(config)?;
    let app = routes::create_app(app_state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
