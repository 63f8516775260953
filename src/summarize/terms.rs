//! Tokenizing, term selection, and sentence splitting

use indexmap::IndexSet;

/// Tokens shorter than this are never significant
pub const MIN_TERM_CHARS: usize = 3;

const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "and", "any", "are", "can", "could", "did", "does", "for",
    "from", "has", "have", "her", "his", "how", "into", "its", "not", "our", "out", "she",
    "should", "tell", "than", "that", "the", "their", "them", "there", "these", "they", "this",
    "those", "was", "were", "what", "when", "where", "which", "who", "whom", "whose", "why",
    "will", "with", "would", "you", "your",
];

/// Splits text into lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
}

/// Folds simple English plurals so "prices" and "price" match
pub fn fold_plural(token: &str) -> String {
    if token.chars().count() <= MIN_TERM_CHARS {
        return token.to_string();
    }
    if let Some(stem) = token.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return token.to_string();
    }
    token.strip_suffix('s').unwrap_or(token).to_string()
}

/// Tokens of `text` in the folded form used for matching
pub fn folded_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    tokenize(text).map(|token| fold_plural(&token))
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Extracts the significant terms of a question
///
/// Terms are folded, stopword-free, at least three characters long, and
/// appear once each in first-occurrence order.
pub fn significant_terms(text: &str) -> Vec<String> {
    let mut terms = IndexSet::new();
    for token in tokenize(text) {
        if token.chars().count() < MIN_TERM_CHARS || is_stopword(&token) {
            continue;
        }
        terms.insert(fold_plural(&token));
    }
    terms.into_iter().collect()
}

/// Splits text into trimmed sentences
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace, or at a line break.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        let boundary = match c {
            '\n' => Some(index),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(index + c.len_utf8()),
                _ => None,
            },
            _ => None,
        };

        if let Some(end) = boundary {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
