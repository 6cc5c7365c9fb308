//! Catalog configuration
//!
//! Defaults match the public catalog API. Values can be overridden from the
//! environment (`CATALOG_*`, `.env` honoured) or with the `with_*` builders.

use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// How the category rule and the text rule combine into the displayed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Whichever input changed last decides the single rule applied.
    #[default]
    LastChanged,
    /// Both rules are applied together.
    Intersect,
}

impl FromStr for FilterPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-changed" | "last_changed" => Ok(Self::LastChanged),
            "intersect" | "and" => Ok(Self::Intersect),
            other => Err(anyhow!(
                "unknown filter policy '{}' (expected last-changed or intersect)",
                other
            )),
        }
    }
}

impl std::fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastChanged => write!(f, "last-changed"),
            Self::Intersect => write!(f, "intersect"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base of the catalog API, always ending in `/`
    pub api_base: Url,
    /// Index page size; only the first page is ever fetched
    pub page_size: usize,
    /// Quiet period for the search text
    pub debounce: Duration,
    pub filter_policy: FilterPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            filter_policy: FilterPolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from `CATALOG_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(base) = std::env::var("CATALOG_API_BASE") {
            config = config.with_api_base(&base)?;
        }
        if let Ok(size) = std::env::var("CATALOG_PAGE_SIZE") {
            let size = size
                .trim()
                .parse()
                .with_context(|| format!("CATALOG_PAGE_SIZE is not a number: {}", size))?;
            config = config.with_page_size(size)?;
        }
        if let Ok(ms) = std::env::var("CATALOG_DEBOUNCE_MS") {
            let ms = ms
                .trim()
                .parse()
                .with_context(|| format!("CATALOG_DEBOUNCE_MS is not a number: {}", ms))?;
            config = config.with_debounce_ms(ms)?;
        }
        if let Ok(policy) = std::env::var("CATALOG_FILTER_POLICY") {
            config = config.with_filter_policy(policy.parse()?);
        }

        debug!(
            api_base = %config.api_base,
            page_size = config.page_size,
            debounce_ms = config.debounce.as_millis() as u64,
            policy = %config.filter_policy,
            "Loaded catalog configuration"
        );
        Ok(config)
    }

    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        let mut base = base.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.api_base =
            Url::parse(&base).with_context(|| format!("Invalid API base URL: {}", base))?;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            bail!("page size must be greater than zero");
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Result<Self> {
        if ms == 0 {
            bail!("debounce interval must be greater than zero");
        }
        self.debounce = Duration::from_millis(ms);
        Ok(self)
    }

    pub fn with_filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = policy;
        self
    }
}
