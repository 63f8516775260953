//! Statistics derived from a crawl report
//!
//! This module provides functionality for summarizing a finished crawl and
//! printing the numbers to stdout.

use crate::crawler::CrawlReport;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Pages kept in the corpus
    pub pages_crawled: usize,

    /// Fetched entries that produced no page
    pub pages_skipped: usize,

    /// Corpus pages whose extraction fell back to the whole body
    pub pages_degraded: usize,

    /// Pages per depth
    pub depth_breakdown: BTreeMap<u32, usize>,

    /// Skip counts by reason label
    pub skip_summary: BTreeMap<String, usize>,

    /// Distinct outbound links across the corpus
    pub total_links: usize,

    /// Links seen outside the crawl scope
    pub off_domain_links: usize,

    /// Facts found across the corpus
    pub total_facts: usize,

    pub stop_reason: String,

    pub elapsed_seconds: f64,
}

impl CrawlStatistics {
    /// Computes statistics for a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            pages_crawled: report.corpus.len(),
            pages_skipped: report.skipped.len(),
            off_domain_links: report.off_domain.len(),
            stop_reason: report.stop_reason.to_string(),
            elapsed_seconds: report.elapsed.as_secs_f64(),
            ..Self::default()
        };

        for page in &report.corpus {
            *stats.depth_breakdown.entry(page.depth).or_insert(0) += 1;
            stats.total_links += page.links.len();
            stats.total_facts += page.facts.len();
            if page.status.is_degraded() {
                stats.pages_degraded += 1;
            }
        }

        for skipped in &report.skipped {
            *stats
                .skip_summary
                .entry(skipped.reason.as_str().to_string())
                .or_insert(0) += 1;
        }

        stats
    }

    /// Share of fetches that produced a page, in percent
    pub fn success_rate(&self) -> f64 {
        let fetched = self.pages_crawled + self.pages_skipped;
        if fetched == 0 {
            return 0.0;
        }
        (self.pages_crawled as f64 / fetched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Pages skipped: {}", stats.pages_skipped);
    println!("  Degraded extractions: {}", stats.pages_degraded);
    println!("  Links found: {}", stats.total_links);
    println!("  Off-domain links: {}", stats.off_domain_links);
    println!("  Facts found: {}", stats.total_facts);
    println!("  Stopped: {}", stats.stop_reason);
    println!("  Elapsed: {:.1}s", stats.elapsed_seconds);
    println!();

    if !stats.depth_breakdown.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &stats.depth_breakdown {
            println!("  {}: {}", depth, count);
        }
        println!();
    }

    if !stats.skip_summary.is_empty() {
        println!("Skip Summary:");
        let mut skip_counts: Vec<_> = stats.skip_summary.iter().collect();
        skip_counts.sort_by(|a, b| b.1.cmp(a.1));

        for (reason, count) in skip_counts {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} fetches produced a page)",
        stats.success_rate(),
        stats.pages_crawled,
        stats.pages_crawled + stats.pages_skipped
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::StopReason;
    use crate::state::{fixtures::page, PageCorpus, PageStatus, SkipReason, SkippedPage};
    use chrono::Utc;
    use indexmap::IndexSet;
    use std::time::Duration;

    #[test]
    fn test_statistics_from_report() {
        let mut deep = page("https://acme.com/a", "A", "text");
        deep.depth = 1;
        deep.links = vec!["https://acme.com/".to_string()];
        deep.status = PageStatus::Degraded {
            reason: "no qualifying content block".to_string(),
        };

        let corpus: PageCorpus = vec![page("https://acme.com/", "Home", "text"), deep]
            .into_iter()
            .collect();

        let skipped = |reason| SkippedPage {
            url: "https://acme.com/x".to_string(),
            depth: 1,
            reason,
            message: String::new(),
        };

        let report = CrawlReport {
            seed: "https://acme.com/".to_string(),
            corpus,
            skipped: vec![
                skipped(SkipReason::Timeout),
                skipped(SkipReason::HttpError(404)),
                skipped(SkipReason::HttpError(500)),
            ],
            off_domain: IndexSet::from(["https://other.com/".to_string()]),
            stop_reason: StopReason::PageLimit,
            started_at: Utc::now(),
            elapsed: Duration::from_secs(2),
        };

        let stats = CrawlStatistics::from_report(&report);
        assert_eq!(stats.pages_crawled, 2);
        assert_eq!(stats.pages_skipped, 3);
        assert_eq!(stats.pages_degraded, 1);
        assert_eq!(stats.total_links, 1);
        assert_eq!(stats.off_domain_links, 1);
        assert_eq!(stats.depth_breakdown.get(&0), Some(&1));
        assert_eq!(stats.depth_breakdown.get(&1), Some(&1));
        assert_eq!(stats.skip_summary.get("http_error"), Some(&2));
        assert_eq!(stats.skip_summary.get("timeout"), Some(&1));
        assert_eq!(stats.stop_reason, "page_limit");
        assert!((stats.success_rate() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_success_rate_without_fetches() {
        assert_eq!(CrawlStatistics::default().success_rate(), 0.0);
    }
}
