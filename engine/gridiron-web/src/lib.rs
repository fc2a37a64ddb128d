//! Gridiron web pages
//!
//! Serves the projections, injuries, schedule and news pages over warp.
//! Every page is built per request from the Tank01 upstream; nothing is
//! kept between requests.

use anyhow::{Context, Result};
use std::sync::Arc;
use tank01_client::{ClientConfig, Tank01Client, Upstream};

pub mod config;
pub mod error;
pub mod logging;
pub mod pages;
pub mod render;
pub mod routes;
pub mod signals;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_support;

pub use config::{load_config, PagesConfig, ServiceConfig};
pub use error::{PageError, PageResult};
pub use logging::initialize_logging;
pub use routes::create_routes;
pub use signals::shutdown_signal;

/// State shared by every request; read-only after startup
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub pages: PagesConfig,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>, pages: PagesConfig) -> Self {
        Self { upstream, pages }
    }
}

/// Build the upstream client from environment-style variables.
///
/// Fails when the RapidAPI key is missing, which must stop the service
/// before it starts listening.
pub fn connect_upstream<F>(lookup: F) -> Result<Tank01Client>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ClientConfig::from_lookup(lookup).context("Upstream configuration is incomplete")?;
    tracing::info!("Using Tank01 upstream at {}", config.base_url);
    Tank01Client::new(config).context("Failed to build the upstream HTTP client")
}
