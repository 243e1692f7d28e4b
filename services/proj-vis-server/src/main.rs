//! Transform service
//!
//! Projects sampling-grid batches and single coordinates for proj-vis
//! clients.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use proj_vis_server::state::DEFAULT_MAX_LIMIT;
use proj_vis_server::{AppState, ServerConfig};

/// Transform service
#[derive(Parser, Debug)]
#[command(name = "proj-vis-server")]
#[command(about = "Coordinate transform service for proj-vis")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:7765", env = "PROJ_VIS_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Largest batch a request may ask for
    #[arg(long, default_value_t = DEFAULT_MAX_LIMIT, env = "PROJ_VIS_MAX_LIMIT")]
    max_limit: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting proj-vis transform service");

    let state = Arc::new(AppState::new(ServerConfig {
        max_limit: args.max_limit.max(1),
    }));

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, max_limit = state.config.max_limit, "Listening");

    proj_vis_server::serve(listener, state)
        .await
        .context("Server error")?;

    Ok(())
}
