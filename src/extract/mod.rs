//! Content extraction module
//!
//! This module turns raw HTML into the pieces the rest of the crate works with:
//! - Main readable text, separated from navigation and page chrome
//! - Title, meta description, and headings
//! - Outbound links
//! - Contact and pricing facts found in the text

mod content;
mod links;
mod patterns;
pub mod scoring;

pub use content::{extract, Extraction, Heading, FALLBACK_TEXT_LIMIT};
pub use links::{extract_links, resolve_link};
pub use patterns::{extract_facts, FactKind, PatternMatches};
