//! Subhub API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p subhub-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use subhub_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Pretty output while developing, JSON in production
    let tracing_config = match &config {
        Ok(config) if config.app.env.is_production() => TracingConfig::production(),
        Ok(config) if config.app.env.is_development() => TracingConfig::development(),
        _ => TracingConfig::default(),
    };
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            Err(e.into())
        }
    };

    if let Err(e) = result {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting Subhub API Server..."
    );

    subhub_api::run(config).await?;

    Ok(())
}
