//! Time bomb game server.
//!
//! Games live in memory, one actor per join code, and expire after a fixed
//! lifetime. Players reach them over HTTP and WebSockets.

use std::net::SocketAddr;

use anyhow::Error;
use log::{error, info};
use pico_args::Arguments;
use tb_server::{
    api::{self, AppState},
    config::ServerConfig,
};
use timebomb::SessionRegistry;

const HELP: &str = "\
Run a time bomb game server

USAGE:
  tb_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:2222]
  --ttl-secs   SECS        Game lifetime in seconds    [default: env GAME_TTL_SECS or 86400]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  GAME_TTL_SECS            Seconds a game lives after creation
  GAME_INBOX_CAPACITY      Pending requests buffered per game
  SUBSCRIBER_CAPACITY      Pending events buffered per display
  RUST_LOG                 Log filter (e.g., info, tb_server=debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let ttl_secs: Option<u64> = pargs.opt_value_from_str("--ttl-secs")?;

    env_logger::builder().format_target(false).init();

    let config = ServerConfig::from_env(bind, ttl_secs)?;
    config.validate()?;

    info!(
        "Starting time bomb server at {} (game lifetime {}s)",
        config.bind,
        config.session.game_ttl.as_secs()
    );

    let registry = SessionRegistry::new(config.session);
    let app = api::create_router(AppState { registry });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }
}
