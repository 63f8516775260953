//! Output module for generating crawl reports
//!
//! This module handles:
//! - Formatting question-and-answer reports and content dumps as markdown
//! - Writing report files and their index
//! - Recording crawl statistics

mod markdown;
pub mod stats;
mod writer;

pub use markdown::{
    extract_org_name, format_content_dump, format_index, format_summary_report,
    sanitize_filename, DEFAULT_ORG_NAME,
};
pub use stats::{print_statistics, CrawlStatistics};
pub use writer::{ReportWriter, INDEX_FILE};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
