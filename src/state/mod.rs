//! State module for crawl results
//!
//! This module holds the records a crawl produces.
//!
//! # Components
//!
//! - `PageStatus` / `SkipReason`: the outcome of each fetched frontier entry
//! - `Page`: one extracted page, immutable once recorded
//! - `PageCorpus`: the append-only, visitation-ordered page sequence

mod corpus;
mod page_state;

// Re-export main types
pub use corpus::{Page, PageCorpus, SkippedPage};
pub use page_state::{FetchMode, PageStatus, SkipReason};

#[cfg(test)]
pub(crate) use corpus::fixtures;
