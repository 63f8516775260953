use crate::url::QueryPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Site-Scribe
///
/// Every section and field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages kept in the corpus
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum link depth from the seed (seed is depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Politeness delay between consecutive fetches (seconds)
    #[serde(rename = "delay-seconds")]
    pub delay_seconds: f64,

    /// Per-fetch timeout (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: f64,

    /// Render pages in a headless browser instead of plain HTTP
    #[serde(rename = "js-mode")]
    pub js_mode: bool,

    /// Extra domain patterns whose links may be followed
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Discard query strings when computing the dedup key
    #[serde(rename = "drop-query")]
    pub drop_query: bool,

    /// Maximum number of browser pages open at once in rendered mode
    #[serde(rename = "render-contexts")]
    pub render_contexts: usize,

    /// Optional wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "deadline-seconds")]
    pub deadline_seconds: Option<f64>,
}

impl CrawlerConfig {
    /// Politeness delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_seconds.max(0.0))
    }

    /// Per-fetch timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds.max(0.0))
    }

    /// Overall crawl deadline as a Duration, if configured
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_seconds
            .map(|secs| Duration::from_secs_f64(secs.max(0.0)))
    }

    /// How query strings take part in URL dedup
    pub fn query_policy(&self) -> QueryPolicy {
        if self.drop_query {
            QueryPolicy::Drop
        } else {
            QueryPolicy::Sort
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_depth: 5,
            delay_seconds: 1.0,
            timeout_seconds: 30.0,
            js_mode: false,
            allowed_domains: Vec::new(),
            drop_query: false,
            render_contexts: 1,
            deadline_seconds: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL or note describing the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+contact)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SiteScribe".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the report files are written into
    pub directory: String,

    /// Only write the content dump, never the Q&A report
    #[serde(rename = "dump-only")]
    pub dump_only: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            dump_only: false,
        }
    }
}
