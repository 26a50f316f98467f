//! # Snapshot History
//!
//! Bounded linear undo/redo over full-document snapshots.
//!
//! ## Design
//!
//! - Every applied mutation captures a full deep copy of the page
//!   collection (structural clone, not serialize-then-parse)
//! - Pushing while mid-history truncates the redo branch
//! - The log is capped; the oldest snapshot is evicted first, and the
//!   cursor stays valid across eviction
//! - Undo/redo outside the valid range are no-ops that return `false`,
//!   matching the forgiving UX of an editor
//!
//! Selection is transient UI state and is deliberately not part of a
//! snapshot.

use chrono::{DateTime, Utc};
use pagecraft_document::{Page, SiteDocument};

/// Default cap on retained snapshots.
pub const DEFAULT_MAX_SNAPSHOTS: usize = 50;

/// Full copy of the page collection at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub pages: Vec<Page>,
    pub current_page_id: String,
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn capture(doc: &SiteDocument) -> Self {
        Self {
            pages: doc.pages.clone(),
            current_page_id: doc.current_page_id.clone(),
            taken_at: Utc::now(),
        }
    }

    fn restore_into(&self, doc: &mut SiteDocument) {
        doc.restore(self.pages.clone(), self.current_page_id.clone());
    }
}

/// Where the cursor sits within the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// No snapshots; undo and redo disabled.
    Empty,
    /// Cursor at the oldest snapshot; undo disabled.
    AtStart,
    /// Both undo and redo available.
    MidHistory,
    /// Cursor at the newest snapshot; redo disabled.
    AtHead,
}

/// Bounded linear undo/redo log.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// Index of the snapshot matching the document's current state.
    /// `None` only while the log is empty.
    cursor: Option<usize>,
    max_snapshots: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_snapshots(DEFAULT_MAX_SNAPSHOTS)
    }

    pub fn with_max_snapshots(max_snapshots: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            max_snapshots,
        }
    }

    /// Record a snapshot, discarding any redo branch.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.max_snapshots {
            // FIFO eviction; the cursor formula below stays valid because
            // the vector shrank by the same one slot the push added.
            self.snapshots.remove(0);
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Step back one snapshot, restoring it verbatim into the document.
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut SiteDocument) -> bool {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.snapshots[cursor - 1].restore_into(doc);
                true
            }
            _ => false,
        }
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to
    /// redo.
    pub fn redo(&mut self, doc: &mut SiteDocument) -> bool {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.snapshots.len() => {
                self.cursor = Some(cursor + 1);
                self.snapshots[cursor + 1].restore_into(doc);
                true
            }
            _ => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        match self.cursor {
            None => HistoryState::Empty,
            Some(0) => HistoryState::AtStart,
            Some(c) if c + 1 == self.snapshots.len() => HistoryState::AtHead,
            Some(_) => HistoryState::MidHistory,
        }
    }

    /// Drop all snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::{Section, SectionKind};

    fn doc_with_section_count(doc: &mut SiteDocument, count: usize) {
        let page = doc.current_page_mut().unwrap();
        page.sections.clear();
        for i in 0..count {
            page.sections
                .push(Section::from_template(format!("section-{i}"), SectionKind::Banner));
        }
    }

    fn section_count(doc: &SiteDocument) -> usize {
        doc.current_page().unwrap().sections.len()
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::new();
        let mut doc = SiteDocument::new();

        assert_eq!(history.state(), HistoryState::Empty);
        assert!(!history.undo(&mut doc));
        assert!(!history.redo(&mut doc));
    }

    #[test]
    fn test_undo_redo_walks_snapshots() {
        let mut history = History::new();
        let mut doc = SiteDocument::new();

        for count in 0..3 {
            doc_with_section_count(&mut doc, count);
            history.push(Snapshot::capture(&doc));
        }
        assert_eq!(history.state(), HistoryState::AtHead);

        assert!(history.undo(&mut doc));
        assert_eq!(section_count(&doc), 1);
        assert_eq!(history.state(), HistoryState::MidHistory);

        assert!(history.undo(&mut doc));
        assert_eq!(section_count(&doc), 0);
        assert_eq!(history.state(), HistoryState::AtStart);
        assert!(!history.undo(&mut doc));

        assert!(history.redo(&mut doc));
        assert_eq!(section_count(&doc), 1);
        assert!(history.redo(&mut doc));
        assert_eq!(section_count(&doc), 2);
        assert!(!history.redo(&mut doc));
    }

    #[test]
    fn test_push_mid_history_discards_redo_branch() {
        let mut history = History::new();
        let mut doc = SiteDocument::new();

        for count in 0..3 {
            doc_with_section_count(&mut doc, count);
            history.push(Snapshot::capture(&doc));
        }

        history.undo(&mut doc);
        history.undo(&mut doc);
        assert!(history.can_redo());

        doc_with_section_count(&mut doc, 7);
        history.push(Snapshot::capture(&doc));

        assert!(!history.can_redo());
        assert!(!history.redo(&mut doc));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_history_bound_and_eviction() {
        let mut history = History::new();
        let mut doc = SiteDocument::new();

        // Push 60 snapshots, each with a distinct section count
        for count in 0..60 {
            doc_with_section_count(&mut doc, count);
            history.push(Snapshot::capture(&doc));
        }
        assert_eq!(history.len(), 50);

        // 49 undos from the head reach the oldest retained snapshot,
        // which is push #11 (count 10), not the true original state
        let mut undone = 0;
        while history.undo(&mut doc) {
            undone += 1;
        }
        assert_eq!(undone, 49);
        assert_eq!(section_count(&doc), 10);
        assert_eq!(history.state(), HistoryState::AtStart);
    }

    #[test]
    fn test_cap_of_one_keeps_latest() {
        let mut history = History::with_max_snapshots(1);
        let mut doc = SiteDocument::new();

        for count in 0..3 {
            doc_with_section_count(&mut doc, count);
            history.push(Snapshot::capture(&doc));
        }

        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
