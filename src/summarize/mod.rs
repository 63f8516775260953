//! Question answering module
//!
//! This module answers a set of questions from the page corpus:
//! - Questions and their answer records
//! - Keyword relevance scoring with source attribution
//! - Direct fact lookups for email, phone, address, and price questions
//! - Per-page summaries for reports

mod answer;
mod question;
pub mod scorer;
pub mod terms;
mod summary;

pub use answer::{Answer, AnswerSet, Confidence};
pub use question::{Question, QuestionKey};
pub use scorer::{Summarizer, SummarizerOptions};
pub use summary::{summarize, summarize_with, PageSummary, Summary, UNKNOWN_SITE};
