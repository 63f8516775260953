//! Configuration module for Site-Scribe
//!
//! This module handles loading, parsing, and validating the TOML crawl
//! configuration and the TOML question file.
//!
//! # Example
//!
//! ```no_run
//! use site_scribe::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scribe.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
pub mod questions;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use questions::{load_questions, parse_questions, parse_questions_toml};
pub use validation::{validate, validate_seed};
