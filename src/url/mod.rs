//! URL handling module for Site-Scribe
//!
//! This module provides URL normalization (the crawl's dedup key), registrable
//! domain reduction, and the scope test that decides which discovered links
//! the crawler is allowed to follow.

mod domain;
mod normalize;

use url::Url;

pub use domain::{extract_domain, registrable_domain};
pub use normalize::{normalize_parsed, normalize_url, normalize_url_with, QueryPolicy};

/// Path extensions that never lead to an HTML page
const NON_PAGE_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".bmp", ".mp3", ".mp4",
    ".avi", ".mov", ".webm", ".wav", ".zip", ".tar", ".gz", ".tgz", ".rar", ".7z", ".dmg",
    ".exe", ".css", ".js", ".json", ".xml", ".woff", ".woff2", ".ttf", ".eot", ".otf",
];

/// The set of hosts a crawl is allowed to follow links into
///
/// A host is in scope when it shares the seed's registrable domain, or when it
/// matches one of the configured allow-list patterns.
#[derive(Debug, Clone)]
pub struct DomainScope {
    seed_domain: String,
    allowed: Vec<String>,
}

impl DomainScope {
    /// Builds the scope for a seed URL and an allow-list of domain patterns
    ///
    /// # Arguments
    ///
    /// * `seed` - The normalized seed URL
    /// * `allowed` - Extra domain patterns (`example.org` or `*.example.org`)
    ///
    /// # Returns
    ///
    /// * `Some(DomainScope)` - The seed has a host
    /// * `None` - The seed has no host
    pub fn new(seed: &Url, allowed: &[String]) -> Option<Self> {
        let host = extract_domain(seed)?;
        Some(Self {
            seed_domain: registrable_domain(&host),
            allowed: allowed.iter().map(|p| p.to_lowercase()).collect(),
        })
    }

    /// The registrable domain of the seed
    pub fn seed_domain(&self) -> &str {
        &self.seed_domain
    }

    /// Returns true if links into this URL's host may be followed
    pub fn contains(&self, url: &Url) -> bool {
        let Some(host) = extract_domain(url) else {
            return false;
        };

        registrable_domain(&host) == self.seed_domain
            || self
                .allowed
                .iter()
                .any(|pattern| matches_wildcard(pattern, &host))
    }
}

/// Checks if a domain matches a wildcard pattern
///
/// `example.com` matches only itself; `*.example.com` matches the bare domain
/// and every subdomain under it.
///
/// # Examples
///
/// ```
/// use site_scribe::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.example.com", "example.com"));
/// assert!(matches_wildcard("*.example.com", "api.v2.example.com"));
/// assert!(!matches_wildcard("*.example.com", "myexample.com"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Returns true unless the URL path ends in a known non-page extension
pub fn is_crawlable_path(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    !NON_PAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
