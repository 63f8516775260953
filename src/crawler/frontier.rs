//! Breadth-first crawl frontier
//!
//! This module handles:
//! - FIFO ordering of URLs waiting to be fetched
//! - The visited set (URLs that have been fetched, including redirect targets)
//! - The queued set, so a URL is never enqueued twice
//! - Depth accounting against the configured maximum

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL to fetch
    pub url: Url,

    /// Link distance from the seed
    pub depth: u32,
}

/// Outcome of offering a discovered link to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// The URL was appended to the queue
    Enqueued,
    /// The child depth would exceed the maximum
    TooDeep,
    /// The URL was already visited or queued
    AlreadySeen,
}

/// The frontier owns the visit queue and the dedup sets for one crawl
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    queued: HashSet<String>,
    max_depth: u32,
}

impl Frontier {
    /// Creates a frontier seeded with one URL at depth 0
    ///
    /// # Arguments
    ///
    /// * `seed` - The normalized seed URL
    /// * `max_depth` - Maximum link depth that may be enqueued
    pub fn new(seed: Url, max_depth: u32) -> Self {
        let mut queued = HashSet::new();
        queued.insert(seed.as_str().to_string());

        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: seed,
            depth: 0,
        });

        Self {
            queue,
            visited: HashSet::new(),
            queued,
            max_depth,
        }
    }

    /// Pops the next unvisited entry in FIFO order
    ///
    /// Entries whose URL was visited after they were queued (for example as a
    /// redirect target) are dropped silently.
    pub fn next(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop_front() {
            if self.visited.contains(entry.url.as_str()) {
                tracing::trace!("Dropping already visited {}", entry.url);
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Marks a URL as visited
    ///
    /// # Returns
    ///
    /// `true` if the URL had not been visited before
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Offers a discovered link found on a page at `parent_depth`
    ///
    /// # Arguments
    ///
    /// * `url` - The normalized link target
    /// * `parent_depth` - Depth of the page the link was found on
    pub fn offer(&mut self, url: Url, parent_depth: u32) -> Offer {
        let depth = parent_depth.saturating_add(1);
        if depth > self.max_depth {
            return Offer::TooDeep;
        }

        let key = url.as_str();
        if self.visited.contains(key) || self.queued.contains(key) {
            return Offer::AlreadySeen;
        }

        self.queued.insert(key.to_string());
        self.queue.push_back(FrontierEntry { url, depth });
        Offer::Enqueued
    }

    /// Returns the number of entries waiting in the queue
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
