//! Tank01 NFL client
//!
//! Thin access layer over the Tank01 NFL API on RapidAPI. Provides the
//! authenticated HTTP client, typed endpoint helpers, and the normalizer
//! that maps the feed's inconsistent team codes and field names onto one
//! canonical set.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod normalize;

pub use client::{Tank01Client, Upstream};
pub use config::ClientConfig;
pub use error::{ConfigError, UpstreamError};
pub use models::*;

/// Environment variable carrying the RapidAPI key
pub const API_KEY_ENV: &str = "X_RAPIDAPI_KEY";

/// Default Tank01 NFL host on RapidAPI
pub const DEFAULT_HOST: &str = "tank01-nfl-live-in-game-real-time-statistics-nfl.p.rapidapi.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
