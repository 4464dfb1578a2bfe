//! Trivia board game server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod jservice;
mod protocol;
mod server;
mod session;

use config::ServerConfig;
use jservice::JServiceSource;
use server::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!(
        api = %config.api_url,
        fetch = ?config.board.fetch,
        "Starting trivia server..."
    );

    let source = JServiceSource::new(config.api_url.clone(), config.http_timeout)?;
    let state = Arc::new(ServerState::new(source, config.board));

    server::run_server(config.addr, state).await
}
