use crate::state::{Page, PageCorpus};
use crate::summarize::terms::split_sentences;
use crate::summarize::{AnswerSet, Question, Summarizer};

/// Site title used when the corpus is empty
pub const UNKNOWN_SITE: &str = "Unknown Site";

const SUMMARY_SENTENCES: usize = 3;
const MIN_SUMMARY_SENTENCE_CHARS: usize = 20;
const MAX_DESCRIPTION_CHARS: usize = 300;
const MAX_SUMMARY_HEADINGS: usize = 5;

/// A short description of one page for reports
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Vec<String>,
}

impl PageSummary {
    /// Summarizes a page from its meta description or its opening sentences
    pub fn from_page(page: &Page) -> Self {
        let description = page
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| opening_sentences(&page.main_text));

        Self {
            url: page.final_url.clone(),
            title: page.title.clone(),
            description,
            headings: page
                .headings
                .iter()
                .take(MAX_SUMMARY_HEADINGS)
                .map(|h| h.text.clone())
                .collect(),
        }
    }
}

/// Answers plus per-page summaries for a whole site
#[derive(Debug, Clone)]
pub struct Summary {
    pub site_url: String,
    pub site_title: String,
    pub total_pages: usize,
    pub answers: AnswerSet,
    pub page_summaries: Vec<PageSummary>,
}

/// Answers the questions and summarizes every page of the corpus
pub fn summarize(corpus: &PageCorpus, questions: &[Question]) -> Summary {
    summarize_with(&Summarizer::new(), corpus, questions)
}

pub fn summarize_with(
    summarizer: &Summarizer,
    corpus: &PageCorpus,
    questions: &[Question],
) -> Summary {
    let first = corpus.get(0);
    let site_url = first.map(|p| p.final_url.clone()).unwrap_or_default();
    let site_title = first
        .map(|p| p.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_SITE)
        .to_string();

    let answers = summarizer.answer_all(corpus, questions);
    tracing::info!(
        "Answered {} of {} questions from {} pages",
        answers.answered_count(),
        answers.len(),
        corpus.len()
    );

    Summary {
        site_url,
        site_title,
        total_pages: corpus.len(),
        answers,
        page_summaries: corpus.iter().map(PageSummary::from_page).collect(),
    }
}

fn opening_sentences(text: &str) -> String {
    let joined = split_sentences(text)
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .filter(|s| s.chars().count() > MIN_SUMMARY_SENTENCE_CHARS)
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(MAX_DESCRIPTION_CHARS).collect()
}
