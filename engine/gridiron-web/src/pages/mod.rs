//! Page controllers
//!
//! Each controller makes its upstream calls one after another, joins and
//! trims the results, and returns a view model for [`crate::render`].
//! A failure on a page's primary data is returned as a [`crate::PageError`];
//! failures on enrichment data are logged and leave a note on the view.

use std::collections::HashMap;

pub mod draft;
pub mod injuries;
pub mod news;
pub mod projections;
pub mod schedule;

/// Raw query string parameters
pub type Query = HashMap<String, String>;

/// Last regular-season week
pub const MAX_WEEK: u32 = 18;

/// Numeric parameter; missing or unparsable values give `default`
pub(crate) fn param_u32(query: &Query, name: &str, default: u32) -> u32 {
    query.get(name).and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}

/// Trimmed text parameter, empty when missing
pub(crate) fn param_text(query: &Query, name: &str) -> String {
    query.get(name).map(|raw| raw.trim().to_string()).unwrap_or_default()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
