//! Fetch failure taxonomy.
//!
//! Every request against the catalog API fails in one of three ways:
//! the transport broke, the server answered with a non-success status, or
//! the body could not be projected into the expected shape. Callers in the
//! load pipeline log these and degrade to "unresolved" / empty results.

use thiserror::Error;

/// Underlying cause carried by transport and parse failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, DNS or connection failure
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Non-2xx response
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Malformed JSON or missing expected fields
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: BoxError,
    },

    /// A locator could not be turned into a request URL
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    pub fn transport(url: impl Into<String>, err: impl Into<BoxError>) -> Self {
        Self::Transport {
            url: url.into(),
            source: err.into(),
        }
    }

    pub fn parse(url: impl Into<String>, err: impl Into<BoxError>) -> Self {
        Self::Parse {
            url: url.into(),
            source: err.into(),
        }
    }

    /// Short category name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } | Self::InvalidUrl { .. } => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Parse { .. } => "parse",
        }
    }
}
