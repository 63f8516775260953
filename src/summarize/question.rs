use std::fmt;

/// How a question is identified inside its category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    /// Keyed questions such as `contact.email`
    Named(String),
    /// Position within a list of questions
    Index(usize),
}

impl QuestionKey {
    /// The key name, if the question has one
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{}", index + 1),
        }
    }
}

/// One question to answer from the corpus
///
/// Category and key are carried through for grouping only; they never
/// change how the question is scored, except that a named key can mark a
/// field-shaped lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub category: String,
    pub key: QuestionKey,
    pub text: String,
}

impl Question {
    pub fn new(category: impl Into<String>, key: QuestionKey, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            key,
            text: text.into(),
        }
    }

    /// Builds an uncategorized question
    pub fn freeform(text: impl Into<String>) -> Self {
        Self::new("custom", QuestionKey::Index(0), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(QuestionKey::Named("email".to_string()).to_string(), "email");
        assert_eq!(QuestionKey::Index(0).to_string(), "1");
    }

    #[test]
    fn test_key_name() {
        assert_eq!(QuestionKey::Named("ceo".to_string()).name(), Some("ceo"));
        assert_eq!(QuestionKey::Index(3).name(), None);
    }
}
