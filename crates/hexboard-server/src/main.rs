//! Board generation server for renderers.

use anyhow::Context;
use hexboard_core::BoardConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod protocol;
mod server;
mod session;

use server::ServerState;

/// Default board settings, overridable through `BOARD_*` environment variables
fn config_from_env() -> anyhow::Result<BoardConfig> {
    let mut config = BoardConfig::default();

    if let Ok(span) = std::env::var("BOARD_RING_SPAN") {
        config.ring_span = span.parse().context("BOARD_RING_SPAN must be an integer")?;
    }
    if let Ok(side) = std::env::var("BOARD_SIDE_LENGTH") {
        config.side_length = side.parse().context("BOARD_SIDE_LENGTH must be a number")?;
    }
    if let Ok(seed) = std::env::var("BOARD_SEED") {
        config.seed = Some(seed.parse().context("BOARD_SEED must be an integer")?);
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse address from env or use default
    let addr: SocketAddr = std::env::var("SERVER_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()?;

    let config = config_from_env()?;
    info!(
        "Starting board server (span {}, side {})",
        config.ring_span, config.side_length
    );

    let state = Arc::new(ServerState::new(config));

    server::run_server(addr, state).await
}
