//! # Site Document
//!
//! The document store: an ordered page collection plus a current-page
//! pointer. Structural invariants enforced here:
//!
//! - The page collection never becomes empty.
//! - Section and page ids come from a single monotonic counter, so ids are
//!   unique for the lifetime of the document. The counter is never rewound,
//!   not even when a history restore replaces the page collection, so a
//!   section added after an undo can never collide with a live id.

use crate::page::Page;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("A document must keep at least one page")]
    LastPage,

    #[error("Patch family '{patch}' does not match section data family '{data}'")]
    FamilyMismatch {
        data: &'static str,
        patch: &'static str,
    },
}

/// In-memory page collection with current-page pointer and id source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    pub pages: Vec<Page>,
    pub current_page_id: String,
    /// Monotonic id counter. Serialized with the document so reloaded
    /// documents keep allocating fresh ids.
    next_id: u64,
}

impl SiteDocument {
    /// Create a document with a single default home page.
    pub fn new() -> Self {
        let mut doc = Self {
            pages: Vec::new(),
            current_page_id: String::new(),
            next_id: 0,
        };
        let id = doc.allocate_id("page");
        doc.pages.push(Page::new(id.clone(), "Home", "/"));
        doc.current_page_id = id;
        doc
    }

    /// Allocate a fresh id with the given prefix.
    pub fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn page_mut(&mut self, page_id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == page_id)
    }

    /// Page the current-page pointer refers to.
    ///
    /// A stale pointer should be impossible given the invariants, but is
    /// defended against rather than unwrapped.
    pub fn current_page(&self) -> Result<&Page, DocumentError> {
        self.page(&self.current_page_id)
            .ok_or_else(|| DocumentError::PageNotFound(self.current_page_id.clone()))
    }

    pub fn current_page_mut(&mut self) -> Result<&mut Page, DocumentError> {
        let id = self.current_page_id.clone();
        self.pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DocumentError::PageNotFound(id))
    }

    /// Look up a section within a page. Sections form a flat ordered
    /// sequence; there is no nesting to descend into.
    pub fn find_section(&self, page_id: &str, section_id: &str) -> Option<&Section> {
        self.page(page_id).and_then(|p| p.section(section_id))
    }

    /// Append a new empty page and point the current-page pointer at it.
    pub fn add_page(&mut self, name: impl Into<String>, path: impl Into<String>) -> String {
        let id = self.allocate_id("page");
        self.pages.push(Page::new(id.clone(), name, path));
        self.current_page_id = id.clone();
        id
    }

    /// Remove a page. Refused when it is the last page.
    pub fn remove_page(&mut self, page_id: &str) -> Result<(), DocumentError> {
        if self.pages.len() == 1 {
            return Err(DocumentError::LastPage);
        }
        let index = self
            .pages
            .iter()
            .position(|p| p.id == page_id)
            .ok_or_else(|| DocumentError::PageNotFound(page_id.to_string()))?;
        self.pages.remove(index);
        if self.current_page_id == page_id {
            self.current_page_id = self.pages[0].id.clone();
        }
        Ok(())
    }

    /// Replace the page collection and pointer verbatim (history restore).
    /// The id counter is deliberately left alone.
    pub fn restore(&mut self, pages: Vec<Page>, current_page_id: String) {
        self.pages = pages;
        self.current_page_id = current_page_id;
    }
}

impl Default for SiteDocument {
    fn default() -> Self {
        Self::new()
    }
}
