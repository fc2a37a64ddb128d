//! Error types for the page controllers

use tank01_client::UpstreamError;
use thiserror::Error;
use warp::http::StatusCode;

/// Errors that abort or annotate a page
#[derive(Error, Debug)]
pub enum PageError {
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("no match for \"{0}\"")]
    NotFound(String),
}

impl PageError {
    /// HTTP status used when the error aborts the whole page
    pub fn status_code(&self) -> StatusCode {
        match self {
            PageError::Upstream(_) => StatusCode::BAD_GATEWAY,
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the visitor
    pub fn user_message(&self) -> String {
        match self {
            PageError::Upstream(e) if e.is_rate_limited() => {
                "The NFL data provider rate limit was reached (HTTP 429). \
                 Wait a moment or reduce request volume, then reload."
                    .to_string()
            }
            PageError::Upstream(UpstreamError::Status { status, .. }) => {
                format!("The NFL data provider returned an error (HTTP {status}).")
            }
            PageError::Upstream(UpstreamError::Transport { .. }) => {
                "The NFL data provider could not be reached or timed out.".to_string()
            }
            PageError::Upstream(UpstreamError::Decode { .. }) => {
                "The NFL data provider sent a response that could not be read.".to_string()
            }
            PageError::NotFound(query) => format!("Sorry — couldn't find \u{201c}{query}\u{201d}."),
        }
    }
}

/// Result type for page controllers
pub type PageResult<T> = Result<T, PageError>;
