//! # Pagecraft Workspace
//!
//! Collaborator boundary around the editor core: key-value persistence,
//! the remote publish endpoint, and user-facing notifications.
//!
//! The core never blocks on a collaborator. Saves after mutations are
//! fire-and-forget tasks; a failed save is logged and surfaced as a
//! notification while the in-memory document stays the source of truth.
//! Overlapping saves are accepted with last-write-wins semantics because
//! every save writes the full document, never a diff.

mod notify;
mod publish;
mod session;
mod store;

pub use notify::{Notification, NotificationLevel};
pub use publish::{PublishError, Publisher};
pub use session::{run_autosave, Session, DEFAULT_AUTOSAVE_PERIOD};
pub use store::{DocumentStore, FileStore, MemoryStore, StoreError};
