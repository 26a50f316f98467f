//! # Editor
//!
//! The single write path over a site document: applies mutations, keeps
//! the bounded snapshot history, and tracks selection and dirty state.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Mutate → Snapshot → Persist (collaborator) → Render
//!   ↓       ↓         ↓           ↓
//! Doc   Mutation   History    Workspace
//! ```

use crate::history::{History, Snapshot};
use crate::mutations::{Mutation, MutationError, MutationOutcome, SelectionEffect};
use crate::selection::Selection;
use pagecraft_document::{DocumentError, Page, Section, SiteDocument};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Editing state for one open document.
pub struct Editor {
    document: SiteDocument,
    history: History,
    selection: Selection,
    /// Unsaved mutations since the last confirmed save.
    dirty: bool,
    /// Increments on every applied mutation and every undo/redo.
    version: u64,
}

impl Editor {
    /// Open a document for editing. A baseline snapshot is pushed so the
    /// first mutation can be undone back to the opening state.
    pub fn new(document: SiteDocument) -> Self {
        let mut history = History::new();
        history.push(Snapshot::capture(&document));

        Self {
            document,
            history,
            selection: Selection::default(),
            dirty: false,
            version: 0,
        }
    }

    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    pub fn current_page(&self) -> Result<&Page, EditorError> {
        Ok(self.document.current_page()?)
    }

    pub fn find_section(&self, page_id: &str, section_id: &str) -> Option<&Section> {
        self.document.find_section(page_id, section_id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select(&mut self, section_id: impl Into<String>) {
        self.selection.select_section(section_id);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a mutation.
    ///
    /// Applied outcomes bump the version, dirty the document, carry out the
    /// selection effect, and push exactly one snapshot. No-ops change
    /// nothing, including history.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, EditorError> {
        let outcome = mutation.apply(&mut self.document)?;

        match &outcome {
            MutationOutcome::Applied { selection, .. } => {
                self.version += 1;
                self.dirty = true;
                match selection {
                    SelectionEffect::Keep => {}
                    SelectionEffect::ClearIf(section_id) => {
                        self.selection.clear_if_section(section_id)
                    }
                    SelectionEffect::ClearAll => self.selection.clear(),
                    SelectionEffect::Select(section_id) => {
                        self.selection.select_section(section_id.clone())
                    }
                }
                self.history.push(Snapshot::capture(&self.document));
                tracing::debug!(version = self.version, "mutation applied");
            }
            MutationOutcome::Noop { reason } => {
                tracing::debug!(reason = *reason, "mutation was a no-op");
            }
        }

        Ok(outcome)
    }

    /// Step back one snapshot. Returns `false` when there is nothing to
    /// undo. Restored state counts as unsaved.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo(&mut self.document);
        if moved {
            self.version += 1;
            self.dirty = true;
        }
        moved
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo(&mut self.document);
        if moved {
            self.version += 1;
            self.dirty = true;
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Called by the persistence layer after a confirmed save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
