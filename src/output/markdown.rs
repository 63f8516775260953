//! Markdown report generation
//!
//! This module formats crawl results as markdown: the question-and-answer
//! report, the full content dump, and the index linking them.

use crate::crawler::CrawlReport;
use crate::extract::FactKind;
use crate::summarize::{Answer, Summary};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Name used when no organization name can be inferred
pub const DEFAULT_ORG_NAME: &str = "website";

/// Title separators tried when splitting page titles into segments
const TITLE_SEPARATORS: &[&str] = &[" - ", " | ", " :: ", " : ", " — ", " – "];

/// Title segments that name a page type rather than an organization
const PAGE_TYPE_WORDS: &[&str] = &[
    "home", "about", "about us", "contact", "contact us", "products", "services", "blog",
    "news", "team", "careers", "faq", "help", "support", "login", "sign in", "register",
];

/// Only the first few titles are considered
const ORG_TITLE_SAMPLE: usize = 5;

const MAX_FILENAME_CHARS: usize = 100;

fn timestamp(generated_at: &DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Formats the question-and-answer report
///
/// # Arguments
///
/// * `summary` - Answers and page summaries
/// * `org_name` - Display name of the site
/// * `generated_at` - Timestamp printed in the header
///
/// # Returns
///
/// A formatted markdown string
pub fn format_summary_report(
    summary: &Summary,
    org_name: &str,
    generated_at: &DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Website Summary: {}\n\n", org_name));
    md.push_str(&format!("- **URL**: {}\n", summary.site_url));
    md.push_str(&format!("- **Site Title**: {}\n", summary.site_title));
    md.push_str(&format!("- **Pages Crawled**: {}\n", summary.total_pages));
    md.push_str(&format!(
        "- **Questions Answered**: {} / {}\n",
        summary.answers.answered_count(),
        summary.answers.len()
    ));
    md.push_str(&format!("- **Generated**: {}\n\n", timestamp(generated_at)));
    md.push_str("---\n\n");

    if !summary.answers.is_empty() {
        md.push_str("## Questions & Answers\n\n");

        let mut number = 0;
        for (category, answers) in summary.answers.by_category() {
            md.push_str(&format!("### {}\n\n", title_case(category)));
            for answer in answers {
                number += 1;
                push_answer(&mut md, number, answer);
            }
        }
    }

    if !summary.page_summaries.is_empty() {
        md.push_str("## Pages Crawled\n\n");

        for page in &summary.page_summaries {
            let title = if page.title.is_empty() {
                "Untitled Page"
            } else {
                page.title.as_str()
            };
            md.push_str(&format!("### {}\n\n", title));
            md.push_str(&format!("**URL**: {}\n\n", page.url));

            if !page.description.is_empty() {
                md.push_str(&format!("{}\n\n", page.description));
            }

            if !page.headings.is_empty() {
                md.push_str("**Key sections:**\n");
                for heading in &page.headings {
                    md.push_str(&format!("- {}\n", heading));
                }
                md.push('\n');
            }

            md.push_str("---\n\n");
        }
    }

    md
}

fn push_answer(md: &mut String, number: usize, answer: &Answer) {
    md.push_str(&format!("#### {}. {}\n\n", number, answer.question.text));

    match &answer.answer_text {
        Some(text) => md.push_str(&format!("{}\n\n", text)),
        None => md.push_str("_No relevant information found._\n\n"),
    }

    if !answer.source_urls.is_empty() {
        md.push_str("**Sources:**\n");
        for source in &answer.source_urls {
            md.push_str(&format!("- {}\n", source));
        }
        md.push('\n');
    }

    md.push_str(&format!("*Confidence: {}*\n\n", answer.confidence));
}

/// Formats the full content dump of a crawl
///
/// Every page is listed in visitation order with its description, headings,
/// facts, and main text, followed by the skipped pages.
pub fn format_content_dump(
    report: &CrawlReport,
    org_name: &str,
    generated_at: &DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Full Content Dump: {}\n\n", org_name));
    md.push_str(&format!("- **Seed**: {}\n", report.seed));
    md.push_str(&format!("- **Total Pages**: {}\n", report.corpus.len()));
    md.push_str(&format!("- **Skipped**: {}\n", report.skipped.len()));
    md.push_str(&format!("- **Stopped**: {}\n", report.stop_reason));
    md.push_str(&format!("- **Generated**: {}\n\n", timestamp(generated_at)));
    md.push_str("---\n\n");

    for (index, page) in report.corpus.iter().enumerate() {
        let title = if page.title.is_empty() {
            "Untitled"
        } else {
            page.title.as_str()
        };
        md.push_str(&format!("## Page {}: {}\n\n", index + 1, title));
        md.push_str(&format!("- **URL**: {}\n", page.url));
        if page.final_url != page.url {
            md.push_str(&format!("- **Final URL**: {}\n", page.final_url));
        }
        md.push_str(&format!("- **Depth**: {}\n", page.depth));
        md.push_str(&format!("- **Fetch Mode**: {}\n", page.fetch_mode));
        md.push_str(&format!("- **Extraction**: {}\n\n", page.status));

        if let Some(description) = &page.description {
            md.push_str("### Description\n\n");
            md.push_str(&format!("{}\n\n", description));
        }

        if !page.headings.is_empty() {
            md.push_str("### Headings\n\n");
            for heading in &page.headings {
                let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
                md.push_str(&format!("{}- {}\n", indent, heading.text));
            }
            md.push('\n');
        }

        if !page.facts.is_empty() {
            md.push_str("### Facts\n\n");
            for kind in FactKind::all() {
                let values = page.facts.of_kind(kind);
                if values.is_empty() {
                    continue;
                }
                let joined = values.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
                md.push_str(&format!("- **{}**: {}\n", title_case(kind.as_str()), joined));
            }
            md.push('\n');
        }

        if !page.main_text.is_empty() {
            md.push_str("### Content\n\n");
            md.push_str(&format!("{}\n\n", page.main_text));
        }

        md.push_str("---\n\n");
    }

    if !report.skipped.is_empty() {
        md.push_str("## Skipped Pages\n\n");
        md.push_str("| URL | Depth | Reason |\n");
        md.push_str("|-----|-------|--------|\n");
        for skipped in &report.skipped {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                skipped.url, skipped.depth, skipped.reason
            ));
        }
        md.push('\n');
    }

    md
}

/// Formats the index linking every generated file
///
/// # Arguments
///
/// * `files` - File names relative to the output directory
pub fn format_index(files: &[String], generated_at: &DateTime<Utc>) -> String {
    let mut md = String::new();

    md.push_str("# Site Scribe Output\n\n");
    md.push_str(&format!("**Generated**: {}\n\n", timestamp(generated_at)));
    md.push_str("## Generated Files\n\n");

    for file in files {
        let stem = file.strip_suffix(".md").unwrap_or(file);
        md.push_str(&format!("- [{}]({})\n", stem, file.replace(' ', "%20")));
    }
    md.push('\n');

    md
}

/// Infers the organization name from page titles
///
/// Titles are split on common separators; segments that name a page type
/// ("Home", "Contact Us") or are too short are dropped, and the most common
/// remaining segment wins, earliest first on ties.
///
/// # Examples
///
/// ```
/// use site_scribe::output::extract_org_name;
///
/// let titles = vec!["Home - Acme Corp".to_string(), "About | Acme Corp".to_string()];
/// assert_eq!(extract_org_name(&titles), "Acme Corp");
/// ```
pub fn extract_org_name(titles: &[String]) -> String {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    for title in titles.iter().filter(|t| !t.trim().is_empty()).take(ORG_TITLE_SAMPLE) {
        let mut parts = vec![title.as_str()];
        for separator in TITLE_SEPARATORS {
            parts = parts
                .into_iter()
                .flat_map(|part| part.split(separator))
                .collect();
        }

        for part in parts {
            let part = part.trim();
            if part.chars().count() > 2 && !PAGE_TYPE_WORDS.contains(&part.to_lowercase().as_str())
            {
                *counts.entry(part.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for (candidate, count) in &counts {
        if best.map_or(true, |(_, best_count)| *count > best_count) {
            best = Some((candidate, *count));
        }
    }

    match best {
        Some((candidate, _)) => candidate.clone(),
        None => titles
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ORG_NAME)
            .to_string(),
    }
}

/// Makes a string safe to use as a file name
///
/// Characters that are invalid on common filesystems become `_`; the result
/// is trimmed and capped at 100 characters.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed: String = replaced.trim().chars().take(MAX_FILENAME_CHARS).collect();
    let trimmed = trimmed.trim_end().to_string();

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        DEFAULT_ORG_NAME.to_string()
    } else {
        trimmed
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::StopReason;
    use crate::extract::extract_facts;
    use crate::state::{fixtures::page, PageCorpus, SkipReason, SkippedPage};
    use crate::summarize::{summarize, Question, QuestionKey};
    use chrono::TimeZone;
    use indexmap::IndexSet;
    use std::time::Duration;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn create_test_report() -> CrawlReport {
        let mut contact = page(
            "https://acme.com/contact",
            "Contact | Acme Corp",
            "Email us at info@acme.com or call (555) 123-4567.",
        );
        contact.facts = extract_facts(&contact.main_text);
        contact.depth = 1;

        let corpus: PageCorpus = vec![
            page("https://acme.com/", "Home - Acme Corp", "Acme Corp builds reliable widgets for everyone."),
            contact,
        ]
        .into_iter()
        .collect();

        CrawlReport {
            seed: "https://acme.com/".to_string(),
            corpus,
            skipped: vec![SkippedPage {
                url: "https://acme.com/broken".to_string(),
                depth: 1,
                reason: SkipReason::HttpError(500),
                message: "HTTP 500".to_string(),
            }],
            off_domain: IndexSet::new(),
            stop_reason: StopReason::FrontierExhausted,
            started_at: generated_at(),
            elapsed: Duration::from_secs(3),
        }
    }

    #[test]
    fn test_format_summary_report() {
        let report = create_test_report();
        let questions = vec![
            Question::new("contact", QuestionKey::Named("email".to_string()), "What is the contact email?"),
            Question::new("about", QuestionKey::Index(0), "What is the capital of Mars?"),
        ];
        let summary = summarize(&report.corpus, &questions);
        let markdown = format_summary_report(&summary, "Acme Corp", &generated_at());

        assert!(markdown.contains("# Website Summary: Acme Corp"));
        assert!(markdown.contains("- **Pages Crawled**: 2"));
        assert!(markdown.contains("### Contact"));
        assert!(markdown.contains("#### 1. What is the contact email?"));
        assert!(markdown.contains("info@acme.com"));
        assert!(markdown.contains("- https://acme.com/contact"));
        assert!(markdown.contains("*Confidence: high*"));
        assert!(markdown.contains("_No relevant information found._"));
        assert!(markdown.contains("*Confidence: none*"));
        assert!(markdown.contains("## Pages Crawled"));
        assert!(markdown.contains("2024-01-01 12:00:00 UTC"));
    }

    #[test]
    fn test_format_content_dump() {
        let report = create_test_report();
        let markdown = format_content_dump(&report, "Acme Corp", &generated_at());

        assert!(markdown.contains("# Full Content Dump: Acme Corp"));
        assert!(markdown.contains("## Page 1: Home - Acme Corp"));
        assert!(markdown.contains("## Page 2: Contact | Acme Corp"));
        assert!(markdown.contains("- **Email**: info@acme.com"));
        assert!(markdown.contains("- **Phone**:"));
        assert!(markdown.contains("### Content"));
        assert!(markdown.contains("| https://acme.com/broken | 1 | http_error(500) |"));
    }

    #[test]
    fn test_content_dump_for_empty_crawl() {
        let mut report = create_test_report();
        report.corpus = PageCorpus::new();
        report.skipped.clear();

        let markdown = format_content_dump(&report, DEFAULT_ORG_NAME, &generated_at());
        assert!(markdown.contains("- **Total Pages**: 0"));
        assert!(!markdown.contains("## Page 1"));
        assert!(!markdown.contains("Skipped Pages"));
    }

    #[test]
    fn test_format_index() {
        let files = vec!["Acme - Summary.md".to_string(), "Acme.md".to_string()];
        let markdown = format_index(&files, &generated_at());
        assert!(markdown.contains("- [Acme - Summary](Acme%20-%20Summary.md)"));
        assert!(markdown.contains("- [Acme](Acme.md)"));
    }

    #[test]
    fn test_extract_org_name() {
        let titles = vec![
            "Home - WHEELS Global Foundation".to_string(),
            "About Us | WHEELS Global Foundation".to_string(),
            "Programs :: WHEELS Global Foundation".to_string(),
        ];
        assert_eq!(extract_org_name(&titles), "WHEELS Global Foundation");
    }

    #[test]
    fn test_extract_org_name_fallbacks() {
        assert_eq!(extract_org_name(&[]), DEFAULT_ORG_NAME);
        assert_eq!(extract_org_name(&["Home".to_string()]), "Home");
        assert_eq!(extract_org_name(&["Acme".to_string()]), "Acme");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Acme: Widgets/Gadgets?"), "Acme_ Widgets_Gadgets_");
        assert_eq!(sanitize_filename("  padded  "), "padded");
        assert_eq!(sanitize_filename(""), DEFAULT_ORG_NAME);
        assert_eq!(sanitize_filename(&"x".repeat(150)).chars().count(), 100);
    }
}
