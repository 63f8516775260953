//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Static HTTP fetching and headless browser rendering
//! - The breadth-first frontier with depth and dedup accounting
//! - Politeness pacing between fetches
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod pacer;
mod renderer;

pub use coordinator::{crawl, CrawlReport, Crawler, StopReason};
pub use fetcher::{build_http_client, is_html_content_type, FetchedPage, Fetcher, StaticFetcher};
pub use frontier::{Frontier, FrontierEntry, Offer};
pub use pacer::Pacer;
pub use renderer::{RenderedFetcher, MAX_RENDER_CONTEXTS};
