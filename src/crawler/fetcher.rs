//! Page fetching
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetcher` seam the crawl loop depends on
//! - Building HTTP clients with proper user agent strings
//! - Static GET fetching with redirect following
//! - Error classification into `FetchError`

use crate::config::UserAgentConfig;
use crate::state::FetchMode;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum redirect hops followed before the fetch fails
const MAX_REDIRECTS: usize = 10;

/// HTML retrieved for one URL
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the document was served from after redirects
    pub final_url: Url,

    /// HTTP status code, when known
    pub status_code: Option<u16>,

    /// Raw or serialized HTML
    pub html: String,
}

/// A source of HTML for the crawler
///
/// The crawl loop only sees this trait; the implementation is picked once per
/// crawl from the configured mode.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one URL within the timeout fixed at construction
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// How this fetcher obtains HTML
    fn mode(&self) -> FetchMode;

    /// Releases any resources held across fetches
    async fn close(&self) {}
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout, body included
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_scribe::config::UserAgentConfig;
/// use site_scribe::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "SiteScribe".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: Some("https://example.com/about".to_string()),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Plain HTTP fetcher; the response body is used verbatim
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Creates a fetcher with its own client
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Request or body read exceeded the timeout | `Timeout` |
    /// | Non-2xx status | `Http { status }` |
    /// | Content-Type present and not HTML | `NotHtml` |
    /// | Connection, DNS, TLS, redirect loop, body decode | `Network` |
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_html_content_type(content_type) {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let html = response.text().await.map_err(|e| classify_error(url, e))?;

        Ok(FetchedPage {
            final_url,
            status_code: Some(status.as_u16()),
            html,
        })
    }

    fn mode(&self) -> FetchMode {
        FetchMode::Static
    }
}

/// Returns true for text/html and XHTML media types
pub fn is_html_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type == "text/html" || media_type == "application/xhtml+xml"
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else if error.is_redirect() {
        FetchError::Network {
            url: url.to_string(),
            message: format!("Redirect error: {}", error),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
