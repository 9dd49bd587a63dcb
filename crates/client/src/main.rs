//! Echoes game client binary.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (and an optional `.env` file)
//! 2. Logging to stderr, filtered by `RUST_LOG`
//! 3. Runtime (game logic) via [`Runtime::builder`]
//! 4. Frontend: a line-oriented stdin/stdout loop
//!
//! # Examples
//!
//! ```bash
//! # Realtime play with the built-in levels
//! cargo run -p echoes-client
//!
//! # Tick only when a command is entered, custom levels
//! ECHOES_TICK_MODE=manual ECHOES_LEVELS=levels.ron cargo run -p echoes-client
//! ```
mod app;
mod input;
mod status;

use anyhow::{Context, Result};
use echoes_runtime::{Runtime, RuntimeConfig};

use crate::app::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = RuntimeConfig::from_env();
    tracing::info!(
        tick_hz = config.tick_rate_hz,
        mode = %config.tick_mode,
        levels = ?config.levels_path,
        "Starting echoes client"
    );

    let tick_period = config.tick_period();
    let runtime = Runtime::builder()
        .config(config)
        .build()
        .await
        .context("failed to start runtime")?;

    let result = CliApp::new(runtime.handle(), tick_period).run().await;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    result
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
