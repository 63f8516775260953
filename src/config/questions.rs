//! Question-file loading
//!
//! Questions are written as YAML. Each top-level mapping is a category whose
//! keys name the questions; a top-level sequence is a category of positional
//! questions; a bare top-level string lands in the `general` category. Nested
//! mappings are flattened with dotted keys. File order is preserved.
//!
//! ```yaml
//! contact:
//!   email: What is the contact email?
//!   phone: What is the phone number?
//!
//! faq:
//!   - Who founded the company?
//!   - Where is the head office?
//! ```
//!
//! Files ending in `.toml` are read as TOML with the same layout.

use crate::summarize::{Question, QuestionKey};
use crate::ConfigError;
use std::path::Path;

/// Category assigned to questions written as top-level strings
pub const DEFAULT_CATEGORY: &str = "general";

/// Format-neutral view of a question file
#[derive(Debug)]
enum Node {
    Text(String),
    List(Vec<Node>),
    Map(Vec<(String, Node)>),
    /// Empty YAML value (`key:` with nothing after it)
    Empty,
}

/// Loads an ordered question set from a YAML or TOML file
///
/// # Arguments
///
/// * `path` - Path to the question file; `.toml` selects TOML, anything else YAML
///
/// # Returns
///
/// * `Ok(Vec<Question>)` - Questions in file order
/// * `Err(ConfigError)` - Failed to read, parse, or interpret the file
pub fn load_questions(path: &Path) -> Result<Vec<Question>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        parse_questions_toml(&content)
    } else {
        parse_questions(&content)
    }
}

/// Parses an ordered question set from YAML text
pub fn parse_questions(content: &str) -> Result<Vec<Question>, ConfigError> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    collect_questions(from_yaml(&value, "document")?)
}

/// Parses an ordered question set from TOML text
pub fn parse_questions_toml(content: &str) -> Result<Vec<Question>, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    let entries = table
        .iter()
        .map(|(key, value)| Ok((key.clone(), from_toml(value, key)?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    collect_questions(Node::Map(entries))
}

fn from_yaml(value: &serde_yaml::Value, location: &str) -> Result<Node, ConfigError> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(Node::Empty),
        Value::String(text) => Ok(Node::Text(text.clone())),
        Value::Sequence(items) => items
            .iter()
            .map(|item| from_yaml(item, location))
            .collect::<Result<_, _>>()
            .map(Node::List),
        Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = yaml_key(key, location)?;
                let node = from_yaml(value, &key)?;
                entries.push((key, node));
            }
            Ok(Node::Map(entries))
        }
        Value::Tagged(tagged) => from_yaml(&tagged.value, location),
        Value::Bool(_) | Value::Number(_) => Err(ConfigError::Validation(format!(
            "questions under '{}' must be strings, got {:?}",
            location, value
        ))),
    }
}

fn yaml_key(key: &serde_yaml::Value, location: &str) -> Result<String, ConfigError> {
    use serde_yaml::Value;

    match key {
        Value::String(key) => Ok(key.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(ConfigError::Validation(format!(
            "question keys under '{}' must be scalars, got {:?}",
            location, other
        ))),
    }
}

fn from_toml(value: &toml::Value, location: &str) -> Result<Node, ConfigError> {
    use toml::Value;

    match value {
        Value::String(text) => Ok(Node::Text(text.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| from_toml(item, location))
            .collect::<Result<_, _>>()
            .map(Node::List),
        Value::Table(table) => table
            .iter()
            .map(|(key, value)| Ok((key.clone(), from_toml(value, key)?)))
            .collect::<Result<_, ConfigError>>()
            .map(Node::Map),
        other => Err(ConfigError::Validation(format!(
            "questions under '{}' must be strings, got {}",
            location,
            other.type_str()
        ))),
    }
}

/// Turns the document root into questions, top-level keys becoming categories
fn collect_questions(root: Node) -> Result<Vec<Question>, ConfigError> {
    let mut questions = Vec::new();

    match root {
        Node::Empty => {}
        Node::Text(text) => push_question(
            &mut questions,
            DEFAULT_CATEGORY,
            QuestionKey::Index(0),
            &text,
        ),
        Node::List(items) => collect_list(&mut questions, DEFAULT_CATEGORY, None, items)?,
        Node::Map(entries) => {
            for (name, value) in entries {
                match value {
                    Node::Empty => {}
                    Node::Text(text) => push_question(
                        &mut questions,
                        DEFAULT_CATEGORY,
                        QuestionKey::Named(name),
                        &text,
                    ),
                    Node::List(items) => collect_list(&mut questions, &name, None, items)?,
                    Node::Map(entries) => flatten_map(&mut questions, &name, None, entries)?,
                }
            }
        }
    }

    tracing::debug!("Loaded {} questions", questions.len());

    Ok(questions)
}

/// Walks one category mapping, joining nested keys with dots
fn flatten_map(
    questions: &mut Vec<Question>,
    category: &str,
    prefix: Option<&str>,
    entries: Vec<(String, Node)>,
) -> Result<(), ConfigError> {
    for (key, value) in entries {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };

        match value {
            Node::Empty => {}
            Node::Text(text) => {
                push_question(questions, category, QuestionKey::Named(path), &text)
            }
            Node::List(items) => collect_list(questions, category, Some(&path), items)?,
            Node::Map(nested) => flatten_map(questions, category, Some(&path), nested)?,
        }
    }

    Ok(())
}

/// Walks a sequence; items directly under a category get positional keys
fn collect_list(
    questions: &mut Vec<Question>,
    category: &str,
    prefix: Option<&str>,
    items: Vec<Node>,
) -> Result<(), ConfigError> {
    for (index, item) in items.into_iter().enumerate() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, index),
            None => index.to_string(),
        };

        match item {
            Node::Empty => {}
            Node::Text(text) => {
                let key = match prefix {
                    Some(_) => QuestionKey::Named(path),
                    None => QuestionKey::Index(index),
                };
                push_question(questions, category, key, &text);
            }
            Node::List(_) => {
                return Err(ConfigError::Validation(format!(
                    "nested lists are not allowed in question category '{}'",
                    category
                )))
            }
            Node::Map(entries) => flatten_map(questions, category, Some(&path), entries)?,
        }
    }

    Ok(())
}

fn push_question(questions: &mut Vec<Question>, category: &str, key: QuestionKey, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    questions.push(Question {
        category: category.to_string(),
        key,
        text: text.to_string(),
    });
}
