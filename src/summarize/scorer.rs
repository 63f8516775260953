//! Keyword question answering over the page corpus
//!
//! Each page gets a relevance score in `[0, 1]` per question:
//!
//! ```text
//! score = COVERAGE_WEIGHT * coverage      (share of question terms present)
//!       + DENSITY_WEIGHT  * density       (term frequency, capped per term)
//!       + TITLE_WEIGHT    * title hits    (terms in the title or headings)
//!       + EARLY_WEIGHT    * early hits    (terms near the start of the text)
//! ```
//!
//! Pages below the relevance threshold are ignored. Every page within the tie
//! margin of the best score is a source, listed in corpus order.

use crate::extract::FactKind;
use crate::state::{Page, PageCorpus};
use crate::summarize::terms::{folded_tokens, significant_terms, split_sentences, tokenize};
use crate::summarize::{Answer, AnswerSet, Confidence, Question};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

pub const COVERAGE_WEIGHT: f64 = 0.6;
pub const DENSITY_WEIGHT: f64 = 0.2;
pub const TITLE_WEIGHT: f64 = 0.1;
pub const EARLY_WEIGHT: f64 = 0.1;

/// Occurrences of one term beyond this add nothing to density
pub const DENSITY_CAP: usize = 3;

/// Characters of main text that count as "early"
pub const EARLY_WINDOW_CHARS: usize = 500;

/// Scores at or above these map to high and medium confidence
pub const HIGH_CONFIDENCE: f64 = 0.8;
pub const MEDIUM_CONFIDENCE: f64 = 0.5;

/// Passage length bounds in characters
pub const MIN_PASSAGE_CHARS: usize = 20;
pub const MAX_PASSAGE_CHARS: usize = 500;

/// Passages whose first this many lowercase characters match are duplicates
const PASSAGE_DEDUP_PREFIX: usize = 100;

/// Answer text used when a source page has no usable sentence
const LEAD_TEXT_CHARS: usize = 300;

/// Field nouns that mark a question as a lookup of one fact category
const EMAIL_TERMS: &[&str] = &["email", "mail"];
const PHONE_TERMS: &[&str] = &["phone", "telephone", "fax"];
const ADDRESS_TERMS: &[&str] = &["address"];
const PRICE_TERMS: &[&str] = &["price", "prices", "pricing", "cost", "costs"];

/// Words that only point at a field alongside [`CONTACT_TERM`]
const WEAK_PHONE_TERMS: &[&str] = &["call", "number"];
const WEAK_ADDRESS_TERMS: &[&str] = &["location", "where", "office", "located"];

/// Weak indicator that falls back to an email lookup when nothing else matched
const CONTACT_TERM: &str = "contact";

/// Tunable parameters of the summarizer
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerOptions {
    /// Pages scoring below this are never sources
    pub min_relevance: f64,
    /// Pages within this distance of the best score tie with it
    pub tie_margin: f64,
    /// Upper bound on passages (or facts) in one answer
    pub max_passages: usize,
    /// Upper bound on passages taken from one page
    pub sentences_per_page: usize,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            min_relevance: 0.2,
            tie_margin: 0.05,
            max_passages: 5,
            sentences_per_page: 3,
        }
    }
}

/// Token statistics of one page, computed once per corpus
#[derive(Debug, Default)]
struct PageProfile {
    counts: HashMap<String, usize>,
    title_terms: HashSet<String>,
    early_terms: HashSet<String>,
}

impl PageProfile {
    fn build(page: &Page) -> Self {
        let mut counts = HashMap::new();
        for token in folded_tokens(&page.main_text) {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut title_terms: HashSet<String> = folded_tokens(&page.title).collect();
        for heading in &page.headings {
            title_terms.extend(folded_tokens(&heading.text));
        }

        let early: String = page.main_text.chars().take(EARLY_WINDOW_CHARS).collect();
        let early_terms = folded_tokens(&early).collect();

        Self {
            counts,
            title_terms,
            early_terms,
        }
    }

    fn score(&self, terms: &[String]) -> f64 {
        if terms.is_empty() {
            return 0.0;
        }
        let total = terms.len() as f64;

        let present = terms.iter().filter(|t| self.counts.contains_key(*t)).count() as f64;
        let density: usize = terms
            .iter()
            .map(|t| self.counts.get(t).copied().unwrap_or(0).min(DENSITY_CAP))
            .sum();
        let title_hits = terms.iter().filter(|t| self.title_terms.contains(*t)).count() as f64;
        let early_hits = terms.iter().filter(|t| self.early_terms.contains(*t)).count() as f64;

        COVERAGE_WEIGHT * (present / total)
            + DENSITY_WEIGHT * (density as f64 / (total * DENSITY_CAP as f64))
            + TITLE_WEIGHT * (title_hits / total)
            + EARLY_WEIGHT * (early_hits / total)
    }
}

/// Answers questions from a page corpus
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    options: SummarizerOptions,
}

impl Summarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SummarizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SummarizerOptions {
        &self.options
    }

    /// Answers every question, in question order
    ///
    /// Never fails: a question nothing in the corpus supports gets an
    /// explicit "not found" answer.
    pub fn answer_all(&self, corpus: &PageCorpus, questions: &[Question]) -> AnswerSet {
        let profiles: Vec<PageProfile> = corpus.iter().map(PageProfile::build).collect();
        let answers = questions
            .iter()
            .map(|question| self.answer_with(corpus, &profiles, question))
            .collect();
        AnswerSet::new(answers)
    }

    /// Answers a single question
    pub fn answer(&self, corpus: &PageCorpus, question: &Question) -> Answer {
        let profiles: Vec<PageProfile> = corpus.iter().map(PageProfile::build).collect();
        self.answer_with(corpus, &profiles, question)
    }

    fn answer_with(
        &self,
        corpus: &PageCorpus,
        profiles: &[PageProfile],
        question: &Question,
    ) -> Answer {
        if let Some(kind) = field_kind(question) {
            if let Some(answer) = self.answer_from_facts(corpus, question, kind) {
                return answer;
            }
        }

        let terms = significant_terms(&question.text);
        if terms.is_empty() {
            tracing::debug!("No significant terms in question: {}", question.text);
            return Answer::not_found(question.clone());
        }

        let scores: Vec<f64> = profiles.iter().map(|p| p.score(&terms)).collect();
        let best = scores
            .iter()
            .copied()
            .filter(|s| *s >= self.options.min_relevance)
            .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))));

        let Some(best) = best else {
            tracing::debug!("No page cleared the threshold for: {}", question.text);
            return Answer::not_found(question.clone());
        };

        let sources: Vec<&Page> = corpus
            .iter()
            .zip(&scores)
            .filter(|(_, score)| **score >= self.options.min_relevance)
            .filter(|(_, score)| best - **score <= self.options.tie_margin)
            .map(|(page, _)| page)
            .collect();

        let answer_text = self.assemble_passages(&sources, &terms);

        Answer {
            question: question.clone(),
            answer_text: Some(answer_text),
            source_urls: sources.iter().map(|p| p.final_url.clone()).collect(),
            confidence: confidence_for(best),
        }
    }

    /// Lists matching facts for field-shaped questions
    fn answer_from_facts(
        &self,
        corpus: &PageCorpus,
        question: &Question,
        kind: FactKind,
    ) -> Option<Answer> {
        let mut facts: IndexSet<&str> = IndexSet::new();
        let mut seen_lower: HashSet<String> = HashSet::new();
        let mut sources: Vec<String> = Vec::new();

        for page in corpus {
            let mut contributed = false;
            for fact in page.facts.of_kind(kind) {
                if facts.len() >= self.options.max_passages {
                    break;
                }
                if seen_lower.insert(fact.to_lowercase()) {
                    facts.insert(fact.as_str());
                    contributed = true;
                }
            }
            if contributed {
                sources.push(page.final_url.clone());
            }
        }

        if facts.is_empty() {
            return None;
        }

        tracing::debug!("Answered '{}' from {} {} facts", question.text, facts.len(), kind);
        Some(Answer {
            question: question.clone(),
            answer_text: Some(facts.into_iter().collect::<Vec<_>>().join("\n")),
            source_urls: sources,
            confidence: Confidence::High,
        })
    }

    /// Joins the best-matching sentences of the source pages
    fn assemble_passages(&self, sources: &[&Page], terms: &[String]) -> String {
        let mut passages: Vec<&str> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for page in sources {
            let mut taken = 0;
            for sentence in split_sentences(&page.main_text) {
                if passages.len() >= self.options.max_passages {
                    break;
                }
                if taken >= self.options.sentences_per_page {
                    break;
                }

                let length = sentence.chars().count();
                if !(MIN_PASSAGE_CHARS..=MAX_PASSAGE_CHARS).contains(&length) {
                    continue;
                }
                if !folded_tokens(sentence).any(|token| terms.contains(&token)) {
                    continue;
                }

                let key: String = sentence
                    .to_lowercase()
                    .chars()
                    .take(PASSAGE_DEDUP_PREFIX)
                    .collect();
                if seen.insert(key) {
                    passages.push(sentence);
                    taken += 1;
                }
            }
        }

        if passages.is_empty() {
            return sources
                .first()
                .map(|page| lead_text(page))
                .unwrap_or_default();
        }

        passages.join("\n\n")
    }
}

/// Decides whether a question is a lookup of one fact category
///
/// The question text and a named key are both consulted. A field noun
/// decides on its own; words like "number" or "where" only count next to
/// "contact", so "What is the number of employees?" stays a lexical question.
pub fn field_kind(question: &Question) -> Option<FactKind> {
    let mut tokens: HashSet<String> = tokenize(&question.text).collect();
    if let Some(name) = question.key.name() {
        tokens.extend(tokenize(name));
    }
    let has = |list: &[&str]| list.iter().any(|term| tokens.contains(*term));

    if has(EMAIL_TERMS) {
        Some(FactKind::Email)
    } else if has(PHONE_TERMS) {
        Some(FactKind::Phone)
    } else if has(ADDRESS_TERMS) {
        Some(FactKind::Address)
    } else if has(PRICE_TERMS) {
        Some(FactKind::Price)
    } else if tokens.contains(CONTACT_TERM) {
        if has(WEAK_PHONE_TERMS) {
            Some(FactKind::Phone)
        } else if has(WEAK_ADDRESS_TERMS) {
            Some(FactKind::Address)
        } else {
            Some(FactKind::Email)
        }
    } else {
        None
    }
}

/// Maps the best page score to a confidence level
pub fn confidence_for(score: f64) -> Confidence {
    if score >= HIGH_CONFIDENCE {
        Confidence::High
    } else if score >= MEDIUM_CONFIDENCE {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn lead_text(page: &Page) -> String {
    let text = page.main_text.trim();
    if text.chars().count() <= LEAD_TEXT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(LEAD_TEXT_CHARS).collect();
    format!("{}...", cut.trim_end())
}
