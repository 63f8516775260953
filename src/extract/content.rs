//! Main-content extraction
//!
//! The extractor separates a page's readable body from its navigation,
//! chrome, and widgets:
//!
//! 1. Non-content elements are skipped by tag, ARIA role, and class/id markers
//! 2. Paragraph-like blocks are scored with [`crate::extract::scoring`]
//! 3. Block scores flow to the parent (full) and grandparent (half)
//! 4. Candidate containers are penalized by their own link density
//! 5. The best candidate plus its contiguous qualifying siblings is the region
//!
//! When nothing qualifies, the whole stripped body text is used instead and
//! the extraction is flagged as degraded. Extraction never fails.

use crate::extract::links::extract_links;
use crate::extract::scoring::{
    adjust_for_links, grandparent_share, link_density, qualifies_as_sibling, score_block,
    BlockStats, MAX_LINK_DENSITY,
};
use ego_tree::NodeId;
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Fallback main text is cut to this many characters
pub const FALLBACK_TEXT_LIMIT: usize = 5000;

/// Elements that never carry main content
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "canvas", "video", "audio", "map", "object",
    "embed", "template", "nav", "header", "footer", "form", "aside", "button", "select",
    "textarea", "input", "dialog", "menu",
];

/// ARIA landmark roles that mark page chrome
const STRIPPED_ROLES: &[&str] = &[
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "search",
    "menu",
    "menubar",
    "dialog",
    "alert",
];

/// Class/id words (after splitting on punctuation) that mark boilerplate exactly
const EXACT_MARKERS: &[&str] = &["ad", "ads", "nav", "toc"];

/// Class/id word prefixes that mark boilerplate
const PREFIX_MARKERS: &[&str] = &[
    "navbar",
    "navigation",
    "sidebar",
    "menu",
    "breadcrumb",
    "pagination",
    "pager",
    "comment",
    "social",
    "share",
    "sharing",
    "related",
    "advert",
    "sponsor",
    "promo",
    "cookie",
    "consent",
    "popup",
    "modal",
    "banner",
    "footer",
    "header",
    "masthead",
    "newsletter",
    "subscribe",
    "skip",
];

/// Structural elements that are never stripped by class/id markers
const MARKER_EXEMPT_TAGS: &[&str] = &["html", "body", "main", "article"];

/// Elements scored as blocks when they hold no block-level children
const SCORED_TAGS: &[&str] = &[
    "p",
    "pre",
    "blockquote",
    "li",
    "td",
    "dd",
    "div",
    "section",
];

/// Elements whose presence turns a container into a non-leaf
const BLOCK_LEVEL_TAGS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "main",
    "aside",
    "ul",
    "ol",
    "dl",
    "table",
    "pre",
    "blockquote",
    "figure",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "footer",
    "nav",
    "form",
    "hr",
];

/// Elements treated as paragraphs when deciding sibling membership
const PARAGRAPH_TAGS: &[&str] = &["p", "pre", "blockquote"];

/// A heading found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `<h1>` through 6 for `<h6>`
    pub level: u8,
    pub text: String,
}

/// Everything the extractor pulls out of one HTML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub title: String,
    pub description: Option<String>,
    pub headings: Vec<Heading>,
    pub main_text: String,
    /// Absolute HTTP(S) links in document order, without duplicates
    pub links: Vec<String>,
    /// Set when main text came from the whole-body fallback
    pub degraded: Option<String>,
}

/// A scored text block in document order
struct Block<'a> {
    element: ElementRef<'a>,
    text: String,
    stats: BlockStats,
    score: f64,
    heading_level: Option<u8>,
}

/// A container that received score from its descendants
struct Candidate<'a> {
    element: ElementRef<'a>,
    score: f64,
    /// Visible-text statistics of the whole container
    stats: BlockStats,
}

/// Candidates keyed by node, in the order they first received score
type Candidates<'a> = IndexMap<NodeId, Candidate<'a>>;

/// Visible text of a subtree with its statistics
struct CollectedText {
    text: String,
    stats: BlockStats,
}

/// Extracts title, main text, headings, description, and links from HTML
///
/// # Arguments
///
/// * `html` - Raw HTML, possibly malformed
/// * `base_url` - URL the document was served from, for resolving links
///
/// # Returns
///
/// An [`Extraction`]; `degraded` is set when no content block qualified
///
/// # Example
///
/// ```
/// use site_scribe::extract::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Acme</title></head><body>
///     <nav><a href="/">Home</a></nav>
///     <article><p>Acme builds rockets, engines, and launch pads for small teams.</p></article>
/// </body></html>"#;
/// let extraction = extract(html, &Url::parse("https://acme.com/").unwrap());
/// assert_eq!(extraction.title, "Acme");
/// assert!(extraction.main_text.starts_with("Acme builds rockets"));
/// assert!(!extraction.main_text.contains("Home"));
/// ```
pub fn extract(html: &str, base_url: &Url) -> Extraction {
    let document = Html::parse_document(html);

    let links = extract_links(&document, base_url);
    let headings = extract_headings(&document);
    let description = meta_content(
        &document,
        &["description", "og:description", "twitter:description"],
    );
    let document_title = select_first(&document, "title")
        .map(|title| collapse_whitespace(&title.text().collect::<String>()))
        .filter(|title| !title.is_empty());

    let mut extraction = Extraction {
        title: String::new(),
        description,
        headings,
        main_text: String::new(),
        links,
        degraded: None,
    };

    let Some(body) = select_first(&document, "body") else {
        extraction.title = document_title.unwrap_or_default();
        extraction.degraded = Some("document has no body".to_string());
        return extraction;
    };

    let mut blocks = Vec::new();
    collect_blocks(body, &mut blocks);

    let candidates = score_candidates(&blocks);

    match best_candidate(&candidates) {
        Some(top) => {
            let region = select_region(top.element, top.score, &candidates);
            extraction.main_text = region_text(&blocks, &region);
            extraction.title = document_title
                .or_else(|| region_heading(&blocks, &region))
                .or_else(|| meta_content(&document, &["og:title"]))
                .unwrap_or_default();
        }
        None => {
            let text = visible_text(body).text;
            extraction.degraded = Some(if text.is_empty() {
                "empty document body".to_string()
            } else {
                "no qualifying content block".to_string()
            });
            extraction.main_text = text.chars().take(FALLBACK_TEXT_LIMIT).collect();
            extraction.title = document_title
                .or_else(|| extraction.headings.first().map(|h| h.text.clone()))
                .or_else(|| meta_content(&document, &["og:title"]))
                .unwrap_or_default();
        }
    }

    extraction
}

/// Returns true if the element and its subtree are page chrome
fn is_boilerplate(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    let tag = value.name();

    if STRIPPED_TAGS.contains(&tag) {
        return true;
    }

    if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
        return true;
    }

    if let Some(role) = value.attr("role") {
        let role = role.trim().to_ascii_lowercase();
        if STRIPPED_ROLES.contains(&role.as_str()) {
            return true;
        }
    }

    if MARKER_EXEMPT_TAGS.contains(&tag) {
        return false;
    }

    has_boilerplate_marker(value.attr("class").unwrap_or(""))
        || has_boilerplate_marker(value.attr("id").unwrap_or(""))
}

/// Checks class or id text for boilerplate marker words
fn has_boilerplate_marker(attribute: &str) -> bool {
    attribute
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| {
            EXACT_MARKERS.contains(&word)
                || PREFIX_MARKERS.iter().any(|marker| word.starts_with(marker))
        })
}

fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn has_block_children(element: ElementRef<'_>) -> bool {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| BLOCK_LEVEL_TAGS.contains(&child.value().name()))
}

/// Walks the tree below `element`, recording headings and leaf blocks
fn collect_blocks<'a>(element: ElementRef<'a>, blocks: &mut Vec<Block<'a>>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        if is_boilerplate(&child) {
            continue;
        }

        let tag = child.value().name();

        if let Some(level) = heading_level(tag) {
            let collected = visible_text(child);
            if !collected.text.is_empty() {
                blocks.push(Block {
                    element: child,
                    text: collected.text,
                    stats: collected.stats,
                    score: 0.0,
                    heading_level: Some(level),
                });
            }
            continue;
        }

        if SCORED_TAGS.contains(&tag) && !has_block_children(child) {
            let collected = visible_text(child);
            if !collected.text.is_empty() {
                let score = score_block(&collected.stats);
                blocks.push(Block {
                    element: child,
                    text: collected.text,
                    stats: collected.stats,
                    score,
                    heading_level: None,
                });
            }
            continue;
        }

        collect_blocks(child, blocks);
    }
}

/// Propagates block scores to ancestors, then applies the link penalty
fn score_candidates<'a>(blocks: &[Block<'a>]) -> Candidates<'a> {
    let mut scores: IndexMap<NodeId, (ElementRef<'a>, f64)> = IndexMap::new();

    for block in blocks.iter().filter(|block| block.score > 0.0) {
        let Some(parent) = block.element.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        add_score(&mut scores, parent, block.score);

        if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
            add_score(&mut scores, grandparent, grandparent_share(block.score));
        }
    }

    scores
        .into_iter()
        .map(|(id, (element, score))| {
            let stats = visible_text(element).stats;
            let score = adjust_for_links(score, link_density(&stats));
            (
                id,
                Candidate {
                    element,
                    score,
                    stats,
                },
            )
        })
        .collect()
}

fn add_score<'a>(
    scores: &mut IndexMap<NodeId, (ElementRef<'a>, f64)>,
    element: ElementRef<'a>,
    score: f64,
) {
    scores.entry(element.id()).or_insert((element, 0.0)).1 += score;
}

/// Highest-scoring candidate; the earliest one wins a tie
fn best_candidate<'a, 'b>(candidates: &'b Candidates<'a>) -> Option<&'b Candidate<'a>> {
    let mut best: Option<&Candidate<'a>> = None;
    for candidate in candidates.values().filter(|c| c.score > 0.0) {
        if best.map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }
    best
}

/// The top candidate extended by contiguous qualifying siblings
fn select_region<'a>(
    top: ElementRef<'a>,
    top_score: f64,
    candidates: &Candidates<'a>,
) -> Vec<ElementRef<'a>> {
    let Some(parent) = top.parent().and_then(ElementRef::wrap) else {
        return vec![top];
    };

    let siblings: Vec<ElementRef<'a>> = parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| !is_boilerplate(sibling))
        .collect();

    let Some(position) = siblings.iter().position(|s| s.id() == top.id()) else {
        return vec![top];
    };

    let qualifies = |sibling: &ElementRef<'a>| {
        let (score, stats) = match candidates.get(&sibling.id()) {
            Some(candidate) => (candidate.score, candidate.stats),
            None => (0.0, visible_text(*sibling).stats),
        };
        if stats.text_chars == 0 {
            return true;
        }
        let is_paragraph = PARAGRAPH_TAGS.contains(&sibling.value().name());
        qualifies_as_sibling(score, top_score, &stats, is_paragraph)
    };

    let mut start = position;
    while start > 0 && qualifies(&siblings[start - 1]) {
        start -= 1;
    }

    let mut end = position;
    while end + 1 < siblings.len() && qualifies(&siblings[end + 1]) {
        end += 1;
    }

    siblings[start..=end].to_vec()
}

fn in_region(element: &ElementRef<'_>, region: &[ElementRef<'_>]) -> bool {
    region.iter().any(|root| {
        root.id() == element.id() || element.ancestors().any(|node| node.id() == root.id())
    })
}

/// Joins the region's headings and readable blocks with blank lines
fn region_text(blocks: &[Block<'_>], region: &[ElementRef<'_>]) -> String {
    blocks
        .iter()
        .filter(|block| in_region(&block.element, region))
        .filter(|block| {
            block.heading_level.is_some() || link_density(&block.stats) <= MAX_LINK_DENSITY
        })
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Highest-level heading inside the region, earliest first
fn region_heading(blocks: &[Block<'_>], region: &[ElementRef<'_>]) -> Option<String> {
    let mut best: Option<(u8, &str)> = None;
    for block in blocks.iter().filter(|block| in_region(&block.element, region)) {
        if let Some(level) = block.heading_level {
            if best.map_or(true, |(best_level, _)| level < best_level) {
                best = Some((level, block.text.as_str()));
            }
        }
    }
    best.map(|(_, text)| text.to_string())
}

/// Collects the visible text of a subtree, skipping boilerplate descendants
fn visible_text(element: ElementRef<'_>) -> CollectedText {
    let mut raw = String::new();
    let mut link_raw = String::new();
    let mut tag_count = 1;

    gather_text(element, false, &mut raw, &mut link_raw, &mut tag_count);

    let text = collapse_whitespace(&raw);
    let link_text = collapse_whitespace(&link_raw);

    let stats = BlockStats {
        text_chars: text.chars().count(),
        link_chars: link_text.chars().count(),
        tag_count,
        comma_count: text.matches(',').count(),
    };

    CollectedText { text, stats }
}

fn gather_text(
    element: ElementRef<'_>,
    in_link: bool,
    text: &mut String,
    link_text: &mut String,
    tag_count: &mut usize,
) {
    for child in element.children() {
        match child.value() {
            Node::Text(fragment) => {
                text.push_str(fragment);
                if in_link {
                    link_text.push_str(fragment);
                }
            }
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                if is_boilerplate(&child) {
                    continue;
                }

                *tag_count += 1;
                let name = child.value().name();
                let separates = name == "br" || BLOCK_LEVEL_TAGS.contains(&name) || name == "li";

                if separates {
                    text.push(' ');
                }
                gather_text(child, in_link || name == "a", text, link_text, tag_count);
                if separates {
                    text.push(' ');
                }
                if name == "a" {
                    link_text.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn extract_headings(document: &Html) -> Vec<Heading> {
    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|heading| {
            !heading
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| is_boilerplate(&ancestor))
        })
        .filter_map(|heading| {
            let level = heading_level(heading.value().name())?;
            let text = collapse_whitespace(&heading.text().collect::<String>());
            (!text.is_empty()).then_some(Heading { level, text })
        })
        .collect()
}

fn meta_content(document: &Html, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        let selector = Selector::parse(&format!(
            "meta[name=\"{}\"], meta[property=\"{}\"]",
            name, name
        ))
        .ok()?;
        document
            .select(&selector)
            .filter_map(|meta| meta.value().attr("content"))
            .map(collapse_whitespace)
            .find(|content| !content.is_empty())
    })
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    let found = document.select(&selector).next();
    found
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://acme.com/about").unwrap()
    }

    const ARTICLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>About Acme | Acme Rockets</title>
  <meta name="description" content="Acme builds small rockets.">
</head>
<body>
  <header class="site-header"><a href="/">Acme</a><h1>Acme Rockets</h1></header>
  <nav><ul><li><a href="/">Home</a></li><li><a href="/pricing">Pricing</a></li><li><a href="/contact">Contact</a></li></ul></nav>
  <div id="page">
    <div class="content">
      <h2>Our story</h2>
      <p>Acme was founded in 1999 by a group of engineers, machinists, and dreamers who wanted rockets to be affordable.</p>
      <p>Today we build launch vehicles, engines, and ground equipment for research teams, universities, and startups.</p>
      <p>Every vehicle is assembled by hand in our workshop, tested on our own pad, and shipped with a full flight report.</p>
    </div>
    <div class="sidebar"><p>Sign up for our newsletter, get discounts, news, and more every single week.</p></div>
  </div>
  <footer><p>Copyright 2024 Acme Rockets, Inc. All rights reserved worldwide.</p></footer>
</body>
</html>"#;

    #[test]
    fn test_article_main_text() {
        let extraction = extract(ARTICLE_PAGE, &base_url());
        assert!(extraction.degraded.is_none());
        assert!(extraction.main_text.contains("Acme was founded in 1999"));
        assert!(extraction.main_text.contains("ground equipment"));
        assert!(extraction.main_text.contains("full flight report"));
        assert!(extraction.main_text.contains("Our story"));
        assert!(!extraction.main_text.contains("newsletter"));
        assert!(!extraction.main_text.contains("Copyright"));
        assert!(!extraction.main_text.contains("Pricing"));
    }

    #[test]
    fn test_blocks_joined_by_blank_lines() {
        let extraction = extract(ARTICLE_PAGE, &base_url());
        let paragraphs: Vec<&str> = extraction.main_text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[0], "Our story");
    }

    #[test]
    fn test_title_description_and_headings() {
        let extraction = extract(ARTICLE_PAGE, &base_url());
        assert_eq!(extraction.title, "About Acme | Acme Rockets");
        assert_eq!(
            extraction.description.as_deref(),
            Some("Acme builds small rockets.")
        );
        // The header's h1 sits in page chrome
        assert_eq!(
            extraction.headings,
            vec![Heading {
                level: 2,
                text: "Our story".to_string()
            }]
        );
    }

    #[test]
    fn test_links_include_navigation() {
        let extraction = extract(ARTICLE_PAGE, &base_url());
        assert_eq!(
            extraction.links,
            vec![
                "https://acme.com/",
                "https://acme.com/pricing",
                "https://acme.com/contact",
            ]
        );
    }

    #[test]
    fn test_title_falls_back_to_region_heading() {
        let html = r#"<html><body><main>
            <h3>Minor</h3>
            <h2>Pricing plans</h2>
            <p>Our plans start at a modest monthly fee, with discounts for annual billing.</p>
        </main></body></html>"#;
        let extraction = extract(html, &base_url());
        assert_eq!(extraction.title, "Pricing plans");
    }

    #[test]
    fn test_title_falls_back_to_og_title() {
        let html = r#"<html><head><meta property="og:title" content="Acme Careers"></head>
            <body><div><p>We are hiring engineers, technicians, and operators for our new plant.</p></div></body></html>"#;
        let extraction = extract(html, &base_url());
        assert_eq!(extraction.title, "Acme Careers");
    }

    #[test]
    fn test_degraded_fallback_uses_body_text() {
        let html = "<html><head><title>Tiny</title></head><body>Content 1</body></html>";
        let extraction = extract(html, &base_url());
        assert_eq!(extraction.main_text, "Content 1");
        assert_eq!(
            extraction.degraded.as_deref(),
            Some("no qualifying content block")
        );
        assert_eq!(extraction.title, "Tiny");
    }

    #[test]
    fn test_degraded_fallback_is_capped() {
        let html = format!("<html><body>{}</body></html>", "word ".repeat(3_000));
        let extraction = extract(&html, &base_url());
        assert!(extraction.degraded.is_some());
        assert_eq!(extraction.main_text.chars().count(), FALLBACK_TEXT_LIMIT);
    }

    #[test]
    fn test_empty_body() {
        let extraction = extract("", &base_url());
        assert_eq!(extraction.main_text, "");
        assert_eq!(extraction.degraded.as_deref(), Some("empty document body"));
        assert_eq!(extraction.title, "");
    }

    #[test]
    fn test_scripts_and_hidden_elements_ignored() {
        let html = r#"<html><body><article>
            <script>var tracking = "a long script string, with commas, that is not content";</script>
            <p hidden>This hidden paragraph has plenty of words, but nobody can see it.</p>
            <p>The visible paragraph explains the product, its price, and its warranty.</p>
        </article></body></html>"#;
        let extraction = extract(html, &base_url());
        assert_eq!(
            extraction.main_text,
            "The visible paragraph explains the product, its price, and its warranty."
        );
    }

    #[test]
    fn test_role_and_class_markers_stripped() {
        let html = r#"<html><body>
            <div role="navigation"><p>Jump to products, services, solutions, and the blog.</p></div>
            <div class="cookie-banner"><p>We use cookies to improve your experience, analytics, and ads.</p></div>
            <div class="post"><p>The real article body talks about rockets, fuel, and orbital mechanics.</p></div>
        </body></html>"#;
        let extraction = extract(html, &base_url());
        assert_eq!(
            extraction.main_text,
            "The real article body talks about rockets, fuel, and orbital mechanics."
        );
    }

    #[test]
    fn test_link_heavy_list_not_selected() {
        let html = r#"<html><body>
            <div class="links">
              <div><a href="/a">A very long link title number one for the directory</a></div>
              <div><a href="/b">A very long link title number two for the directory</a></div>
            </div>
            <div class="story"><p>This paragraph is the only prose on the page, and it is long enough.</p></div>
        </body></html>"#;
        let extraction = extract(html, &base_url());
        assert!(extraction.degraded.is_none());
        assert!(extraction.main_text.starts_with("This paragraph is the only prose"));
        assert!(!extraction.main_text.contains("directory"));
    }

    #[test]
    fn test_malformed_html_is_repaired() {
        let html = "<html><body><div><p>Unclosed paragraph with enough text, commas, and words<p>Second one, also long enough to count as prose";
        let extraction = extract(html, &base_url());
        assert!(extraction.main_text.contains("Unclosed paragraph"));
        assert!(extraction.main_text.contains("Second one"));
    }

    #[test]
    fn test_candidates_accumulate_per_node() {
        let paragraphs: String = (0..500)
            .map(|i| format!("<p>Paragraph {} has enough words, and a comma, to qualify.</p>", i))
            .collect();
        let html = format!("<html><body><article>{}</article></body></html>", paragraphs);
        let document = Html::parse_document(&html);
        let body = select_first(&document, "body").unwrap();

        let mut blocks = Vec::new();
        collect_blocks(body, &mut blocks);
        assert_eq!(blocks.len(), 500);

        let candidates = score_candidates(&blocks);
        assert_eq!(candidates.len(), 2);

        let article = candidates.values().next().unwrap();
        assert_eq!(article.element.value().name(), "article");
        let expected: f64 = blocks.iter().map(|block| block.score).sum();
        assert!((article.score - expected).abs() < 1e-6);

        let top = best_candidate(&candidates).unwrap();
        assert_eq!(top.element.id(), article.element.id());
    }

    #[test]
    fn test_boilerplate_markers() {
        assert!(has_boilerplate_marker("main-navigation"));
        assert!(has_boilerplate_marker("Sidebar left"));
        assert!(has_boilerplate_marker("ad"));
        assert!(has_boilerplate_marker("top-ads-slot"));
        assert!(!has_boilerplate_marker("unavailable"));
        assert!(!has_boilerplate_marker("shadow-lg"));
        assert!(!has_boilerplate_marker("content"));
        assert!(!has_boilerplate_marker(""));
    }
}
