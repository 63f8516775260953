//! Outbound link discovery
//!
//! Links are taken from every `<a href>` in the document, boilerplate regions
//! included, since navigation menus are how most of a site is reached.

use indexmap::IndexSet;
use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from the document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that is not HTTP(S) after resolution
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base_url` - The base URL for resolving relative links
///
/// # Returns
///
/// Absolute URLs in document order, without duplicates
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = IndexSet::new();

    let base = document_base(document, base_url);

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, &base) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links.into_iter().collect()
}

/// Honors a `<base href>` element when it resolves to an HTTP(S) URL
fn document_base(document: &Html, base_url: &Url) -> Url {
    Selector::parse("base[href]")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("href"))
                .and_then(|href| base_url.join(href.trim()).ok())
        })
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or_else(|| base_url.clone())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
