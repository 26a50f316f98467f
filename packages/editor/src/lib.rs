//! # Pagecraft Editor
//!
//! Core state engine for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: pages + sections (typed payloads) │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: the single write path               │
//! │  - Apply mutations with validation          │
//! │  - Bounded snapshot history (undo/redo)     │
//! │  - Selection + dirty tracking               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: persistence + publish boundary   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One writer**: every document write flows through [`Editor::apply`]
//! 2. **No mutation escapes history**: each applied mutation pushes exactly
//!    one snapshot; no-ops push nothing
//! 3. **Forgiving surface**: missing ids and boundary moves are no-ops,
//!    never panics; undo/redo outside the valid range returns `false`
//! 4. **Renderer is a consumer**: it reads the document and calls back into
//!    the mutation API; errors never cross that boundary as panics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_document::SiteDocument;
//! use pagecraft_editor::{Editor, Mutation};
//!
//! let mut editor = Editor::new(SiteDocument::new());
//!
//! editor.apply(Mutation::AddSection {
//!     kind: "hero-1".to_string(),
//!     name: None,
//!     position: None,
//!     patch: None,
//! })?;
//!
//! editor.undo();
//! editor.redo();
//! ```

mod editor;
mod history;
mod mutations;
mod selection;

pub use editor::{Editor, EditorError};
pub use history::{History, HistoryState, Snapshot, DEFAULT_MAX_SNAPSHOTS};
pub use mutations::{MoveDirection, Mutation, MutationError, MutationOutcome, SelectionEffect};
pub use selection::Selection;

// Re-export the data model for convenience
pub use pagecraft_document::{Page, Section, SectionData, SectionKind, SectionPatch, SiteDocument};
