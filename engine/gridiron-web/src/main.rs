//! Gridiron web server
//!
//! Loads configuration, connects the Tank01 client and serves the pages
//! until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use gridiron_web::{
    config, connect_upstream, create_routes, initialize_logging, load_config, shutdown_signal,
    AppState,
};

#[derive(Parser, Debug)]
#[command(name = "gridiron-web")]
#[command(about = "Fantasy football pages over the Tank01 NFL API")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML configuration file (defaults to $GRIDIRON_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config_path = args.config.or_else(|| std::env::var_os("GRIDIRON_CONFIG").map(PathBuf::from));
    let mut config = load_config(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    initialize_logging(&config.logging)?;
    info!("Starting gridiron-web v{}", env!("CARGO_PKG_VERSION"));

    let client = connect_upstream(|name| std::env::var(name).ok())?;
    let state = Arc::new(AppState::new(Arc::new(client), config.pages.clone()));
    info!(
        "Season {}; ADP board {}, injury scan {}/{}",
        config.pages.season,
        config.pages.adp_board_size,
        config.pages.injury_scan_limit,
        config.pages.injury_max_results
    );

    let routes = create_routes(state);
    let addr = config.server_addr()?;
    let (bound, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on http://{}", bound);
    server.await;

    info!("gridiron-web shutdown complete");
    Ok(())
}
