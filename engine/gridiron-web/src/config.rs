//! Service configuration management

use anyhow::{Context, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Page behaviour (list sizes, season)
    pub pages: PagesConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Settings that control how much each page asks of the upstream.
///
/// Lowering the list sizes is the supported way to stay under the RapidAPI
/// quota when pages start failing with HTTP 429.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PagesConfig {
    /// Season year sent upstream (e.g. "2025")
    pub season: String,

    /// Rows shown in the ADP board on the projections page
    pub adp_board_size: usize,

    /// Rounds in the simulated snake draft
    pub draft_rounds: u32,

    /// Top ADP players scanned for injuries
    pub injury_scan_limit: usize,

    /// Maximum injury notes listed
    pub injury_max_results: usize,

    /// Headlines requested from the news feed
    pub news_max_items: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            season: current_season(),
            adp_board_size: 25,
            draft_rounds: 15,
            injury_scan_limit: 50,
            injury_max_results: 25,
            news_max_items: 40,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl ServiceConfig {
    /// Get the server address
    pub fn server_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("Invalid server address {}:{}", self.server.host, self.server.port))
    }
}

/// Current season, i.e. the calendar year
pub fn current_season() -> String {
    chrono::Utc::now().year().to_string()
}

/// Load configuration from an optional TOML file and environment variables
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from file: {:?}", path);
            load_from_file(path)?
        }
        None => ServiceConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML file; missing sections take defaults
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {path:?}"))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse configuration file: {path:?}"))
}

/// Override configuration values from `GRIDIRON_*` variables
pub fn apply_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("GRIDIRON_HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("GRIDIRON_PORT") {
        config.server.port = port.parse().with_context(|| format!("Invalid GRIDIRON_PORT: {port}"))?;
    }
    if let Some(season) = lookup("GRIDIRON_SEASON") {
        config.pages.season = season;
    }
    if let Some(level) = lookup("GRIDIRON_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = lookup("GRIDIRON_LOG_FORMAT") {
        config.logging.format = format;
    }

    let sizes: [(&str, &mut usize); 3] = [
        ("GRIDIRON_ADP_BOARD_SIZE", &mut config.pages.adp_board_size),
        ("GRIDIRON_INJURY_SCAN", &mut config.pages.injury_scan_limit),
        ("GRIDIRON_INJURY_MAX", &mut config.pages.injury_max_results),
    ];
    for (name, slot) in sizes {
        if let Some(value) = lookup(name) {
            *slot = value.parse().with_context(|| format!("Invalid {name}: {value}"))?;
        }
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    if config.pages.season.len() != 4 || config.pages.season.parse::<u32>().is_err() {
        return Err(anyhow::anyhow!("Invalid season: {}", config.pages.season));
    }

    if config.pages.draft_rounds == 0 {
        return Err(anyhow::anyhow!("Draft must have at least one round"));
    }

    config.server_addr()?;
    Ok(())
}
