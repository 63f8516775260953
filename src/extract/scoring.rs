//! Content block scoring
//!
//! Scores are computed from plain text statistics so the heuristic can be
//! exercised without any HTML. The extractor collects a [`BlockStats`] for
//! each paragraph-like element and feeds it through these functions.

/// Blocks with less visible text than this never score
pub const MIN_PARAGRAPH_CHARS: usize = 25;

/// Every qualifying block starts with this many points
pub const BASE_BLOCK_SCORE: f64 = 1.0;

/// One point per this many characters of text
pub const CHARS_PER_POINT: f64 = 100.0;

/// Cap on the length contribution
pub const MAX_LENGTH_POINTS: f64 = 3.0;

/// Points per comma (a cheap proxy for prose)
pub const COMMA_POINTS: f64 = 1.0;

/// Each element tag costs this many "characters" when computing text density
pub const MARKUP_CHARS_PER_TAG: f64 = 12.0;

/// Share of the score that depends on text density; the rest is unconditional
pub const DENSITY_WEIGHT: f64 = 0.5;

/// Blocks whose link text exceeds this share of their text score zero
pub const MAX_LINK_DENSITY: f64 = 0.5;

/// Grandparents receive the block score divided by this
pub const GRANDPARENT_DIVISOR: f64 = 2.0;

/// A sibling joins the selection when its score reaches this share of the top score
pub const SIBLING_RATIO: f64 = 0.2;

/// Floor for the sibling score threshold
pub const MIN_SIBLING_SCORE: f64 = 10.0;

/// Paragraph siblings longer than this join on low link density alone
pub const LONG_SIBLING_CHARS: usize = 80;

/// Link density ceiling for long paragraph siblings
pub const SIBLING_MAX_LINK_DENSITY: f64 = 0.25;

/// Text statistics for one block or candidate container
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlockStats {
    /// Visible characters after whitespace collapsing
    pub text_chars: usize,
    /// Visible characters that sit inside `<a>` elements
    pub link_chars: usize,
    /// Number of elements inside the block, the block itself included
    pub tag_count: usize,
    pub comma_count: usize,
}

impl BlockStats {
    /// Builds stats for a text with no markup and no links
    pub fn for_text(text: &str) -> Self {
        Self {
            text_chars: text.chars().count(),
            link_chars: 0,
            tag_count: 1,
            comma_count: text.matches(',').count(),
        }
    }
}

/// Share of a block's text that is link text, in `[0, 1]`
pub fn link_density(stats: &BlockStats) -> f64 {
    if stats.text_chars == 0 {
        return 0.0;
    }
    (stats.link_chars as f64 / stats.text_chars as f64).min(1.0)
}

/// Share of a block's weight that is text rather than markup, in `[0, 1]`
pub fn text_density(stats: &BlockStats) -> f64 {
    let text = stats.text_chars as f64;
    let markup = stats.tag_count as f64 * MARKUP_CHARS_PER_TAG;
    if text + markup == 0.0 {
        return 0.0;
    }
    text / (text + markup)
}

/// Scores a paragraph-like block
///
/// # Arguments
///
/// * `stats` - Text statistics of the block
///
/// # Returns
///
/// A non-negative score; zero for short or link-dominated blocks
pub fn score_block(stats: &BlockStats) -> f64 {
    if stats.text_chars < MIN_PARAGRAPH_CHARS {
        return 0.0;
    }

    let density = link_density(stats);
    if density > MAX_LINK_DENSITY {
        return 0.0;
    }

    let length_points = (stats.text_chars as f64 / CHARS_PER_POINT).min(MAX_LENGTH_POINTS);
    let raw = BASE_BLOCK_SCORE + stats.comma_count as f64 * COMMA_POINTS + length_points;
    let scaled = raw * ((1.0 - DENSITY_WEIGHT) + DENSITY_WEIGHT * text_density(stats));

    adjust_for_links(scaled, density)
}

/// Share of a block's score handed to its grandparent
pub fn grandparent_share(score: f64) -> f64 {
    score / GRANDPARENT_DIVISOR
}

/// Penalizes an accumulated score by link density
pub fn adjust_for_links(score: f64, link_density: f64) -> f64 {
    score * (1.0 - link_density.clamp(0.0, 1.0))
}

/// Decides whether a sibling of the top candidate joins the selected region
///
/// # Arguments
///
/// * `sibling_score` - The sibling's accumulated candidate score (zero if it never scored)
/// * `top_score` - The winning candidate's final score
/// * `stats` - The sibling's own text statistics
/// * `is_paragraph` - Whether the sibling is itself a paragraph element
pub fn qualifies_as_sibling(
    sibling_score: f64,
    top_score: f64,
    stats: &BlockStats,
    is_paragraph: bool,
) -> bool {
    let threshold = (top_score * SIBLING_RATIO).max(MIN_SIBLING_SCORE);
    if sibling_score >= threshold {
        return true;
    }

    if !is_paragraph {
        return false;
    }

    let density = link_density(stats);
    if stats.text_chars > LONG_SIBLING_CHARS {
        density < SIBLING_MAX_LINK_DENSITY
    } else {
        stats.text_chars >= MIN_PARAGRAPH_CHARS && density == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(text_chars: usize, link_chars: usize, commas: usize) -> BlockStats {
        BlockStats {
            text_chars,
            link_chars,
            tag_count: 1,
            comma_count: commas,
        }
    }

    #[test]
    fn test_short_block_scores_zero() {
        assert_eq!(score_block(&stats(MIN_PARAGRAPH_CHARS - 1, 0, 5)), 0.0);
    }

    #[test]
    fn test_link_dominated_block_scores_zero() {
        assert_eq!(score_block(&stats(200, 150, 2)), 0.0);
    }

    #[test]
    fn test_longer_prose_scores_higher() {
        let short = score_block(&stats(60, 0, 0));
        let long = score_block(&stats(300, 0, 0));
        let commas = score_block(&stats(300, 0, 4));
        assert!(short > 0.0);
        assert!(long > short);
        assert!(commas > long);
    }

    #[test]
    fn test_length_points_are_capped() {
        let a = score_block(&stats(1_000, 0, 0));
        let b = score_block(&stats(5_000, 0, 0));
        assert!((b - a).abs() < 0.1);
    }

    #[test]
    fn test_markup_heavy_block_scores_lower() {
        let lean = score_block(&stats(100, 0, 1));
        let heavy = score_block(&BlockStats {
            text_chars: 100,
            link_chars: 0,
            tag_count: 20,
            comma_count: 1,
        });
        assert!(heavy < lean);
        assert!(heavy > 0.0);
    }

    #[test]
    fn test_some_links_reduce_score() {
        let clean = score_block(&stats(200, 0, 1));
        let linked = score_block(&stats(200, 60, 1));
        assert!(linked < clean);
        assert!(linked > 0.0);
    }

    #[test]
    fn test_link_density() {
        assert_eq!(link_density(&stats(0, 0, 0)), 0.0);
        assert_eq!(link_density(&stats(100, 25, 0)), 0.25);
        assert_eq!(link_density(&stats(10, 50, 0)), 1.0);
    }

    #[test]
    fn test_adjust_for_links() {
        assert_eq!(adjust_for_links(10.0, 0.0), 10.0);
        assert_eq!(adjust_for_links(10.0, 0.5), 5.0);
        assert_eq!(adjust_for_links(10.0, 1.0), 0.0);
    }

    #[test]
    fn test_grandparent_share() {
        assert_eq!(grandparent_share(8.0), 4.0);
    }

    #[test]
    fn test_sibling_by_score() {
        let s = stats(10, 0, 0);
        assert!(qualifies_as_sibling(30.0, 100.0, &s, false));
        assert!(!qualifies_as_sibling(15.0, 100.0, &s, false));
        // The floor applies when the top score is small
        assert!(!qualifies_as_sibling(5.0, 10.0, &s, false));
    }

    #[test]
    fn test_sibling_paragraph_rules() {
        assert!(qualifies_as_sibling(0.0, 100.0, &stats(120, 10, 0), true));
        assert!(!qualifies_as_sibling(0.0, 100.0, &stats(120, 60, 0), true));
        assert!(qualifies_as_sibling(0.0, 100.0, &stats(40, 0, 0), true));
        assert!(!qualifies_as_sibling(0.0, 100.0, &stats(40, 5, 0), true));
        assert!(!qualifies_as_sibling(0.0, 100.0, &stats(120, 0, 0), false));
    }
}
