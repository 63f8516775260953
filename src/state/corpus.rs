//! Page records and the append-only page corpus

use crate::extract::{Heading, PatternMatches};
use crate::state::{FetchMode, PageStatus, SkipReason};

/// One successfully fetched and extracted page
///
/// Built once by the crawler and never modified after it enters the corpus.
#[derive(Debug, Clone)]
pub struct Page {
    /// Normalized URL the page was requested under
    pub url: String,
    /// Normalized URL after redirects
    pub final_url: String,
    /// Link distance from the seed
    pub depth: u32,
    pub title: String,
    /// Meta description, if the page declares one
    pub description: Option<String>,
    pub headings: Vec<Heading>,
    pub main_text: String,
    /// Normalized outbound links in document order, without duplicates
    pub links: Vec<String>,
    pub facts: PatternMatches,
    pub fetch_mode: FetchMode,
    pub status_code: Option<u16>,
    pub status: PageStatus,
}

/// A frontier entry that was fetched but produced no page
#[derive(Debug, Clone)]
pub struct SkippedPage {
    pub url: String,
    pub depth: u32,
    pub reason: SkipReason,
    pub message: String,
}

/// Pages in visitation order
///
/// Only the crawler appends; everyone else reads.
#[derive(Debug, Clone, Default)]
pub struct PageCorpus {
    pages: Vec<Page>,
}

impl PageCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Finds a page by its requested or final URL
    pub fn find(&self, url: &str) -> Option<&Page> {
        self.pages
            .iter()
            .find(|page| page.url == url || page.final_url == url)
    }
}

impl<'a> IntoIterator for &'a PageCorpus {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl FromIterator<Page> for PageCorpus {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}
