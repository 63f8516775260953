//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Validating the configuration and seed
//! - Driving the breadth-first frontier
//! - Coordinating fetching, extraction, and link discovery
//! - Handling cancellation and the overall deadline
//! - Assembling the final crawl report

use crate::config::{validate, validate_seed, Config};
use crate::crawler::fetcher::{FetchedPage, Fetcher, StaticFetcher};
use crate::crawler::frontier::{Frontier, FrontierEntry, Offer};
use crate::crawler::pacer::Pacer;
use crate::crawler::renderer::RenderedFetcher;
use crate::extract::{extract, extract_facts};
use crate::state::{Page, PageCorpus, PageStatus, SkipReason, SkippedPage};
use crate::url::{is_crawlable_path, normalize_parsed, DomainScope, QueryPolicy};
use crate::{ScribeError, UrlError};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use std::fmt;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No unvisited URLs remained
    FrontierExhausted,
    /// The corpus reached max-pages
    PageLimit,
    /// The cancellation token fired
    Cancelled,
    /// The configured deadline elapsed
    DeadlineReached,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontierExhausted => "frontier_exhausted",
            Self::PageLimit => "page_limit",
            Self::Cancelled => "cancelled",
            Self::DeadlineReached => "deadline_reached",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Normalized seed URL
    pub seed: String,

    /// Pages in visitation order
    pub corpus: PageCorpus,

    /// Fetched entries that produced no page
    pub skipped: Vec<SkippedPage>,

    /// Links seen outside the crawl scope, in discovery order
    pub off_domain: IndexSet<String>,

    pub stop_reason: StopReason,

    pub started_at: DateTime<Utc>,

    pub elapsed: Duration,
}

impl CrawlReport {
    /// Number of fetches issued, successful or not
    pub fn fetch_count(&self) -> usize {
        self.corpus.len() + self.skipped.len()
    }
}

/// Main crawler structure
///
/// Each crawler owns its fetcher and cancellation token; all per-crawl state
/// lives inside [`Crawler::crawl`], so separate crawlers never interfere.
pub struct Crawler {
    config: Config,
    fetcher: Box<dyn Fetcher>,
    cancel: CancellationToken,
}

impl Crawler {
    /// Creates a crawler with the fetcher selected by `js-mode`
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(ScribeError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ScribeError> {
        let fetcher: Box<dyn Fetcher> = if config.crawler.js_mode {
            Box::new(RenderedFetcher::new(
                config.crawler.timeout(),
                config.crawler.render_contexts,
            ))
        } else {
            Box::new(StaticFetcher::new(
                &config.user_agent,
                config.crawler.timeout(),
            )?)
        };

        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            config,
            fetcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the crawl before its next fetch when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs one breadth-first crawl from `seed`
    ///
    /// Configuration and seed errors are returned before any fetch. Per-page
    /// failures are recorded in the report and never abort the crawl.
    pub async fn crawl(&mut self, seed: &str) -> Result<CrawlReport, ScribeError> {
        validate(&self.config)?;
        let policy = self.config.crawler.query_policy();
        let seed_url = validate_seed(seed, policy)?;
        let scope = DomainScope::new(&seed_url, &self.config.crawler.allowed_domains)
            .ok_or(UrlError::MissingDomain)?;

        let started_at = Utc::now();
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl of {} ({} mode, max {} pages, depth {})",
            seed_url,
            self.fetcher.mode(),
            self.config.crawler.max_pages,
            self.config.crawler.max_depth
        );

        let mut run = CrawlRun {
            frontier: Frontier::new(seed_url.clone(), self.config.crawler.max_depth),
            pacer: Pacer::new(self.config.crawler.delay()),
            scope,
            policy,
            corpus: PageCorpus::new(),
            skipped: Vec::new(),
            off_domain: IndexSet::new(),
        };

        let deadline = self
            .config
            .crawler
            .deadline()
            .map(|budget| start_time + budget);

        let stop_reason = self.run_loop(&mut run, deadline, start_time).await;

        self.fetcher.close().await;

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl finished ({}): {} pages, {} skipped in {:?}",
            stop_reason,
            run.corpus.len(),
            run.skipped.len(),
            elapsed
        );

        Ok(CrawlReport {
            seed: seed_url.to_string(),
            corpus: run.corpus,
            skipped: run.skipped,
            off_domain: run.off_domain,
            stop_reason,
            started_at,
            elapsed,
        })
    }

    async fn run_loop(
        &self,
        run: &mut CrawlRun,
        deadline: Option<Instant>,
        start_time: Instant,
    ) -> StopReason {
        let max_pages = self.config.crawler.max_pages;
        let mut fetches = 0usize;

        loop {
            if let Some(reason) = self.interrupted(deadline) {
                return reason;
            }

            if run.corpus.len() >= max_pages {
                tracing::info!("Reached page limit of {}", max_pages);
                return StopReason::PageLimit;
            }

            let Some(entry) = run.frontier.next() else {
                tracing::info!("Frontier is empty, crawl complete");
                return StopReason::FrontierExhausted;
            };

            if !self.wait_politely(&run.pacer, deadline).await {
                return self
                    .interrupted(deadline)
                    .unwrap_or(StopReason::Cancelled);
            }

            run.frontier.mark_visited(entry.url.as_str());
            tracing::debug!("Fetching {} (depth {})", entry.url, entry.depth);

            let result = self.fetcher.fetch(&entry.url).await;
            run.pacer.record_fetch();
            fetches += 1;

            match result {
                Ok(fetched) => self.process_page(run, &entry, fetched),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", entry.url, e);
                    run.skipped.push(SkippedPage {
                        url: entry.url.to_string(),
                        depth: entry.depth,
                        reason: SkipReason::from(&e),
                        message: e.to_string(),
                    });
                }
            }

            // Progress reporting every 10 fetches
            if fetches % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = fetches as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {} pages kept, {} skipped, {} in frontier, {:.2} pages/sec",
                    run.corpus.len(),
                    run.skipped.len(),
                    run.frontier.len(),
                    rate
                );
            }
        }
    }

    /// Returns the stop reason if the crawl was cancelled or ran out of time
    fn interrupted(&self, deadline: Option<Instant>) -> Option<StopReason> {
        if self.cancel.is_cancelled() {
            tracing::info!("Crawl cancelled");
            return Some(StopReason::Cancelled);
        }
        if deadline.is_some_and(|at| Instant::now() >= at) {
            tracing::info!("Crawl deadline reached");
            return Some(StopReason::DeadlineReached);
        }
        None
    }

    /// Waits out the politeness delay; false if cancelled or past the deadline
    async fn wait_politely(&self, pacer: &Pacer, deadline: Option<Instant>) -> bool {
        match deadline {
            Some(at) => {
                tokio::select! {
                    waited = pacer.wait(&self.cancel) => waited && Instant::now() < at,
                    _ = tokio::time::sleep_until(tokio::time::Instant::from_std(at)) => false,
                }
            }
            None => pacer.wait(&self.cancel).await,
        }
    }

    /// Extracts a fetched document and enqueues its links
    fn process_page(&self, run: &mut CrawlRun, entry: &FrontierEntry, fetched: FetchedPage) {
        let final_url = match normalize_parsed(fetched.final_url.clone(), run.policy) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Final URL {} not normalizable: {}", fetched.final_url, e);
                entry.url.clone()
            }
        };

        if final_url != entry.url && !run.frontier.mark_visited(final_url.as_str()) {
            tracing::info!(
                "Skipping {}: redirected to already visited {}",
                entry.url,
                final_url
            );
            run.skipped.push(SkippedPage {
                url: entry.url.to_string(),
                depth: entry.depth,
                reason: SkipReason::DuplicateRedirect,
                message: format!("Redirected to already visited {}", final_url),
            });
            return;
        }

        let extraction = extract(&fetched.html, &fetched.final_url);
        let facts = extract_facts(&extraction.main_text);

        let status = match extraction.degraded {
            Some(reason) => {
                tracing::debug!("Extraction degraded for {}: {}", entry.url, reason);
                PageStatus::Degraded { reason }
            }
            None => PageStatus::Complete,
        };

        let links = normalize_links(&extraction.links, run.policy);
        for link in &links {
            let Ok(url) = Url::parse(link) else {
                continue;
            };

            if !run.scope.contains(&url) {
                run.off_domain.insert(link.clone());
                continue;
            }

            if !is_crawlable_path(&url) {
                tracing::trace!("Not following non-page link {}", url);
                continue;
            }

            match run.frontier.offer(url, entry.depth) {
                Offer::Enqueued => tracing::trace!("Enqueued {}", link),
                Offer::TooDeep => tracing::trace!("Too deep: {}", link),
                Offer::AlreadySeen => {}
            }
        }

        tracing::info!(
            "Crawled {} (depth {}, {} links, {} facts)",
            entry.url,
            entry.depth,
            links.len(),
            facts.len()
        );

        run.corpus.push(Page {
            url: entry.url.to_string(),
            final_url: final_url.to_string(),
            depth: entry.depth,
            title: extraction.title,
            description: extraction.description,
            headings: extraction.headings,
            main_text: extraction.main_text,
            links,
            facts,
            fetch_mode: self.fetcher.mode(),
            status_code: fetched.status_code,
            status,
        });
    }
}

/// Mutable state of one crawl invocation
struct CrawlRun {
    frontier: Frontier,
    pacer: Pacer,
    scope: DomainScope,
    policy: QueryPolicy,
    corpus: PageCorpus,
    skipped: Vec<SkippedPage>,
    off_domain: IndexSet<String>,
}

/// Normalizes absolute links and removes duplicates, keeping first occurrence
fn normalize_links(links: &[String], policy: QueryPolicy) -> Vec<String> {
    let mut normalized = IndexSet::new();
    for link in links {
        let Ok(parsed) = Url::parse(link) else {
            continue;
        };
        match normalize_parsed(parsed, policy) {
            Ok(url) => {
                normalized.insert(url.to_string());
            }
            Err(e) => tracing::debug!("Failed to normalize URL {}: {}", link, e),
        }
    }
    normalized.into_iter().collect()
}

/// Runs a complete crawl with the fetcher selected by the configuration
///
/// # Arguments
///
/// * `seed` - Absolute HTTP(S) seed URL
/// * `config` - The crawler configuration
pub async fn crawl(seed: &str, config: Config) -> Result<CrawlReport, ScribeError> {
    let mut crawler = Crawler::new(config)?;
    crawler.crawl(seed).await
}
