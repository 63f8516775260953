//! Headless browser fetching
//!
//! One Chromium instance is launched on first use and shared by every
//! navigation of the crawl. A semaphore caps how many pages are open at once.

use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::state::FetchMode;
use crate::FetchError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use url::Url;

/// Upper bound on concurrently open browser pages
pub const MAX_RENDER_CONTEXTS: usize = 4;

/// Reads the main document's HTTP status from Navigation Timing; 0 when unavailable
const NAVIGATION_STATUS_JS: &str =
    "(performance.getEntriesByType('navigation')[0] || {}).responseStatus || 0";

/// A launched browser and the task driving its CDP connection
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

/// Fetcher that navigates a headless browser and returns the serialized DOM
pub struct RenderedFetcher {
    session: Mutex<Option<BrowserSession>>,
    contexts: Semaphore,
    timeout: Duration,
}

impl RenderedFetcher {
    /// Creates a renderer; the browser itself is launched on the first fetch
    ///
    /// # Arguments
    ///
    /// * `timeout` - Navigation timeout per page
    /// * `render_contexts` - Maximum pages open at once (clamped to 1..=4)
    pub fn new(timeout: Duration, render_contexts: usize) -> Self {
        Self {
            session: Mutex::new(None),
            contexts: Semaphore::new(render_contexts.clamp(1, MAX_RENDER_CONTEXTS)),
            timeout,
        }
    }

    /// Opens a blank page, launching the browser if needed
    async fn open_page(&self, url: &Url) -> Result<Page, FetchError> {
        let mut session = self.session.lock().await;

        if session.is_none() {
            tracing::info!("Launching headless browser");
            *session = Some(launch_browser().await.map_err(|message| {
                FetchError::Render {
                    url: url.to_string(),
                    message,
                }
            })?);
        }

        let Some(active) = session.as_ref() else {
            return Err(FetchError::Render {
                url: url.to_string(),
                message: "Browser session unavailable".to_string(),
            });
        };

        active
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: format!("Failed to open page: {}", e),
            })
    }

    /// Navigates and serializes within the timeout
    async fn render(&self, page: &Page, url: &Url) -> Result<FetchedPage, FetchError> {
        let render_error = |e: chromiumoxide::error::CdpError| FetchError::Render {
            url: url.to_string(),
            message: e.to_string(),
        };

        let navigation = async {
            page.goto(url.as_str()).await.map_err(render_error)?;
            page.wait_for_navigation().await.map_err(render_error)?;
            let html = page.content().await.map_err(render_error)?;
            let final_url = page.url().await.map_err(render_error)?;
            Ok::<_, FetchError>((html, final_url))
        };

        let (html, final_url) = tokio::time::timeout(self.timeout, navigation)
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
            })??;

        let status_code = navigation_status(page).await;
        if let Some(status) = status_code {
            if !(200..300).contains(&status) {
                return Err(FetchError::Http {
                    url: url.to_string(),
                    status,
                });
            }
        }

        let final_url = final_url
            .and_then(|u| Url::parse(&u).ok())
            .filter(|u| u.scheme() == "http" || u.scheme() == "https")
            .unwrap_or_else(|| url.clone());

        Ok(FetchedPage {
            final_url,
            status_code,
            html,
        })
    }
}

#[async_trait]
impl Fetcher for RenderedFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let _permit = self
            .contexts
            .acquire()
            .await
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Rendering {}", url);
        let page = self.open_page(url).await?;
        let result = self.render(&page, url).await;

        // Pages hold CDP targets until closed explicitly
        if let Err(e) = page.close().await {
            tracing::warn!("Failed to close page for {}: {}", url, e);
        }

        result
    }

    fn mode(&self) -> FetchMode {
        FetchMode::Rendered
    }

    async fn close(&self) {
        let Some(mut session) = self.session.lock().await.take() else {
            return;
        };

        tracing::info!("Shutting down headless browser");
        if let Err(e) = session.browser.close().await {
            tracing::warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = session.browser.wait().await {
            tracing::warn!("Failed to wait for browser exit: {}", e);
        }
        session.handler.abort();
    }
}

async fn launch_browser() -> Result<BrowserSession, String> {
    let config = BrowserConfig::builder().build()?;
    let (browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| format!("Failed to launch browser: {}", e))?;

    let handler = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::trace!("Browser handler event error: {}", e);
            }
        }
    });

    Ok(BrowserSession { browser, handler })
}

async fn navigation_status(page: &Page) -> Option<u16> {
    let result = page.evaluate(NAVIGATION_STATUS_JS).await.ok()?;
    let status = result.into_value::<u16>().ok()?;
    (status != 0).then_some(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contexts_are_clamped() {
        let fetcher = RenderedFetcher::new(Duration::from_secs(1), 0);
        assert_eq!(fetcher.contexts.available_permits(), 1);

        let fetcher = RenderedFetcher::new(Duration::from_secs(1), 16);
        assert_eq!(fetcher.contexts.available_permits(), MAX_RENDER_CONTEXTS);
    }

    #[test]
    fn test_rendered_mode() {
        let fetcher = RenderedFetcher::new(Duration::from_secs(1), 1);
        assert_eq!(fetcher.mode(), FetchMode::Rendered);
    }

    #[tokio::test]
    async fn test_close_without_launch_is_noop() {
        let fetcher = RenderedFetcher::new(Duration::from_secs(1), 1);
        fetcher.close().await;
        assert!(fetcher.session.lock().await.is_none());
    }
}
