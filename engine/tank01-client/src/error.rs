//! Error types for the Tank01 client

use thiserror::Error;

/// Errors returned by an upstream call
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status { endpoint: String, status: u16, body: String },

    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("could not decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },
}

impl UpstreamError {
    /// HTTP status code, when the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the upstream quota is exhausted (HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    pub fn endpoint(&self) -> &str {
        match self {
            UpstreamError::Status { endpoint, .. }
            | UpstreamError::Transport { endpoint, .. }
            | UpstreamError::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// Errors raised while building the client configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set. Put it in your .env or shell environment.")]
    MissingApiKey(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_detection() {
        let err = UpstreamError::Status {
            endpoint: "getNFLADP".to_string(),
            status: 429,
            body: r#"{"message":"Too many requests"}"#.to_string(),
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.endpoint(), "getNFLADP");

        let err = UpstreamError::Transport {
            endpoint: "getNFLNews".to_string(),
            message: "timed out".to_string(),
        };
        assert!(!err.is_rate_limited());
        assert_eq!(err.status(), None);
    }
}
