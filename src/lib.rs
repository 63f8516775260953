//! Site-Scribe: a website reader that crawls, extracts, and answers
//!
//! This crate walks a single website breadth-first from a seed URL, pulls the
//! main readable content out of every page it visits, scans that content for
//! contact and pricing facts, and answers a set of questions from the
//! resulting corpus with source attribution.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod summarize;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// All of these are fatal and surface before any page is fetched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Per-page fetch failures
///
/// These never abort a crawl; the crawler records them as skipped pages.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Render error for {url}: {message}")]
    Render { url: String, message: String },

    #[error("Not an HTML document at {url} ({content_type})")]
    NotHtml { url: String, content_type: String },
}

impl FetchError {
    /// The URL the failed fetch was issued for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Http { url, .. }
            | Self::Network { url, .. }
            | Self::Render { url, .. }
            | Self::NotHtml { url, .. } => url,
        }
    }
}

/// Result type alias for Site-Scribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, Crawler};
pub use state::{Page, PageCorpus, PageStatus, SkipReason};
pub use summarize::{Answer, AnswerSet, Confidence, Question, Summarizer};
pub use crate::url::{normalize_url, registrable_domain};
