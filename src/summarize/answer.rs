use crate::summarize::Question;
use indexmap::IndexMap;
use std::fmt;

/// How strongly the sources support an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Confidence {
    /// Nothing cleared the relevance threshold
    None,
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to one question
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub question: Question,

    /// `None` means "not found"; never a guess
    pub answer_text: Option<String>,

    /// Pages supporting the answer, in corpus order
    pub source_urls: Vec<String>,

    pub confidence: Confidence,
}

impl Answer {
    /// An explicit "not found" answer
    pub fn not_found(question: Question) -> Self {
        Self {
            question,
            answer_text: None,
            source_urls: Vec::new(),
            confidence: Confidence::None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer_text.is_some()
    }
}

/// One answer per question, in question order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self { answers }
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Number of answers with text
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    /// Groups answers by category, categories in first-seen order
    pub fn by_category(&self) -> IndexMap<&str, Vec<&Answer>> {
        let mut groups: IndexMap<&str, Vec<&Answer>> = IndexMap::new();
        for answer in &self.answers {
            groups
                .entry(answer.question.category.as_str())
                .or_default()
                .push(answer);
        }
        groups
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}
