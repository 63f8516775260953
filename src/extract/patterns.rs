//! Fact extraction: emails, phone numbers, street addresses, prices
//!
//! Each category is an independent regex scan over plain text. Matches are
//! approximate; overlapping matches across categories are all kept.

use indexmap::IndexSet;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Fewest digits a phone number may have
const MIN_PHONE_DIGITS: usize = 7;

/// Most digits a phone number may have (E.164 limit)
const MAX_PHONE_DIGITS: usize = 15;

/// Domain endings that look like emails but are asset names (`logo@2x.png`)
const ASSET_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".css", ".js"];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap());

/// North-American numbers: `(555) 123-4567`, `555.123.4567`, `+1 555 123 4567`
static PHONE_NANP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+1[-.\s]?|\b1[-.\s])?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap()
});

/// International numbers with a country code: `+44 20 7946 0958`, `+33 1 23 45 67 89`
static PHONE_INTL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+\d{1,3}[\s.-]?(?:\(?\d{1,4}\)?[\s.-]?){1,4}\d{2,4}\b").unwrap()
});

/// National numbers with a trunk prefix: `020 7946 0958`, `01632 960983`
static PHONE_TRUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b0\d{2,4}[\s-]?\d{3,4}[\s-]?\d{3,4}\b").unwrap());

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b\d{1,6}\s+(?:[A-Z0-9][A-Za-z0-9.'-]*\s+){1,4}",
        r"(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Court|Ct|",
        r"Place|Pl|Parkway|Pkwy|Highway|Hwy|Terrace|Square|Sq)\b\.?",
        r"(?:\s*,\s*[A-Z][a-z]+(?:[ .'-][A-Z][a-z]+){0,2})?",
        r"(?:\s*,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?)?",
    ))
    .unwrap()
});

/// `$1,299.99`, `€ 49`, `£5.50`, `¥1200`
static PRICE_SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£¥]\s?\d+(?:[,.]\d{3})*(?:[.,]\d{1,2})?").unwrap());

/// `USD 20`, `EUR 1.200,50`
static PRICE_CODE_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:USD|EUR|GBP|CAD|AUD)\s?\d+(?:[,.]\d{3})*(?:[.,]\d{1,2})?").unwrap()
});

/// `20 USD`, `15 dollars`, `49,99 €`
static PRICE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b\d+(?:[,.]\d{3})*(?:[.,]\d{1,2})?\s?",
        r"(?:(?:USD|EUR|GBP|CAD|AUD|dollars?|euros?|pounds?)\b|[€£])",
    ))
    .unwrap()
});

/// The categories of facts the extractor looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    Email,
    Phone,
    Address,
    Price,
}

impl FactKind {
    pub fn all() -> [Self; 4] {
        [Self::Email, Self::Phone, Self::Address, Self::Price]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts found in one page's text, each category in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatches {
    pub emails: IndexSet<String>,
    pub phones: IndexSet<String>,
    pub addresses: IndexSet<String>,
    pub prices: IndexSet<String>,
}

impl PatternMatches {
    /// The matches of one category
    pub fn of_kind(&self, kind: FactKind) -> &IndexSet<String> {
        match kind {
            FactKind::Email => &self.emails,
            FactKind::Phone => &self.phones,
            FactKind::Address => &self.addresses,
            FactKind::Price => &self.prices,
        }
    }

    pub fn is_empty(&self) -> bool {
        FactKind::all().iter().all(|kind| self.of_kind(*kind).is_empty())
    }

    /// Total number of facts across all categories
    pub fn len(&self) -> usize {
        FactKind::all()
            .iter()
            .map(|kind| self.of_kind(*kind).len())
            .sum()
    }
}

/// Scans text for emails, phone numbers, street addresses, and prices
///
/// # Arguments
///
/// * `text` - Plain text (typically a page's main text)
///
/// # Returns
///
/// The de-duplicated matches of each category in order of appearance.
/// Emails and addresses are de-duplicated case-insensitively, phones by
/// their digit sequence, and prices exactly.
///
/// # Example
///
/// ```
/// use site_scribe::extract::extract_facts;
///
/// let facts = extract_facts("Write to info@acme.com or call (555) 123-4567.");
/// assert!(facts.emails.contains("info@acme.com"));
/// assert!(facts.phones.contains("(555) 123-4567"));
/// ```
pub fn extract_facts(text: &str) -> PatternMatches {
    PatternMatches {
        emails: extract_emails(text),
        phones: extract_phones(text),
        addresses: dedupe_by(
            non_overlapping(&[&*ADDRESS_RE], text),
            |address| address.to_lowercase(),
        ),
        prices: dedupe_by(
            non_overlapping(
                &[&*PRICE_SYMBOL_RE, &*PRICE_CODE_PREFIX_RE, &*PRICE_SUFFIX_RE],
                text,
            ),
            |price| price.to_string(),
        ),
    }
}

fn extract_emails(text: &str) -> IndexSet<String> {
    let emails = EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|email| {
            let lowered = email.to_lowercase();
            !ASSET_SUFFIXES.iter().any(|suffix| lowered.ends_with(suffix))
        })
        .map(str::to_string)
        .collect();

    dedupe_by(emails, |email| email.to_lowercase())
}

fn extract_phones(text: &str) -> IndexSet<String> {
    let candidates = non_overlapping(&[&*PHONE_NANP_RE, &*PHONE_INTL_RE, &*PHONE_TRUNK_RE], text)
        .into_iter()
        .filter(|phone| {
            let digits = digits_of(phone).len();
            (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
        })
        .collect();

    dedupe_by(candidates, phone_key)
}

/// Digit sequence used to spot the same number written differently;
/// a leading North-American country code is ignored
fn phone_key(phone: &str) -> String {
    let digits = digits_of(phone);
    if digits.len() == 11 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    }
}

fn digits_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Runs several regexes and keeps matches in text order, dropping any match
/// whose span lies inside one already kept
fn non_overlapping(patterns: &[&Regex], text: &str) -> Vec<String> {
    let mut spans: Vec<(usize, usize)> = patterns
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();

    // Longest match first among those starting at the same offset
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut kept: Vec<(usize, usize)> = Vec::new();
    for (start, end) in spans {
        if kept
            .iter()
            .any(|&(kept_start, kept_end)| start >= kept_start && end <= kept_end)
        {
            continue;
        }
        kept.push((start, end));
    }

    kept.into_iter()
        .map(|(start, end)| text[start..end].trim().to_string())
        .collect()
}

fn dedupe_by<F>(values: Vec<String>, key: F) -> IndexSet<String>
where
    F: Fn(&str) -> String,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(key(value.as_str())))
        .collect()
}
