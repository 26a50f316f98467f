//! # Edit Session
//!
//! Ties one editor to its collaborators: the key-value store the document
//! persists to, the optional publish endpoint, and the notification
//! channel the UI drains.
//!
//! There is exactly one logical writer (the UI event loop), so the session
//! is not shared; the autosave task takes the session behind a mutex only
//! to cross the task boundary.

use crate::notify::Notification;
use crate::publish::Publisher;
use crate::store::{DocumentStore, StoreError};
use pagecraft_document::{document_from_json, document_to_json, SiteDocument};
use pagecraft_editor::{Editor, EditorError, Mutation, MutationOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How often the autosave loop checks for unsaved changes.
pub const DEFAULT_AUTOSAVE_PERIOD: Duration = Duration::from_secs(30);

pub struct Session {
    editor: Editor,
    store: Arc<dyn DocumentStore>,
    key: String,
    publisher: Option<Publisher>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl Session {
    /// Open the document stored under `key`, falling back to a fresh
    /// default document when the store is empty, unreadable, or
    /// unavailable. Opening never fails; persistence problems are logged
    /// and the in-memory state becomes the authority.
    pub fn open(
        store: Arc<dyn DocumentStore>,
        key: impl Into<String>,
        notifications: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        let key = key.into();
        let document = match store.load(&key) {
            Ok(Some(payload)) => match document_from_json(&payload) {
                Ok(document) => document,
                Err(e) => {
                    warn!(key = %key, error = %e, "stored document unreadable, starting fresh");
                    SiteDocument::new()
                }
            },
            Ok(None) => SiteDocument::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "store unavailable, starting in memory");
                let _ = notifications.send(Notification::warning(
                    "Storage is unavailable; changes are kept in memory",
                ));
                SiteDocument::new()
            }
        };

        Self {
            editor: Editor::new(document),
            store,
            key,
            publisher: None,
            notifications,
        }
    }

    pub fn with_publisher(mut self, publisher: Publisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    /// Apply a mutation and, when it took effect, persist in the
    /// background. The mutation path never waits on the store.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationOutcome, EditorError> {
        let outcome = self.editor.apply(mutation)?;
        if matches!(outcome, MutationOutcome::Applied { .. }) {
            self.spawn_save();
        }
        Ok(outcome)
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.editor.undo();
        if moved {
            self.spawn_save();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.editor.redo();
        if moved {
            self.spawn_save();
        }
        moved
    }

    /// Fire-and-forget full-document save. Failures are logged and
    /// surfaced as notifications; the caller is never blocked. The dirty
    /// flag is untouched here since nothing confirms this write back to
    /// the session.
    fn spawn_save(&self) {
        let payload = match document_to_json(self.editor.document()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "could not serialize document for save");
                return;
            }
        };
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let notifications = self.notifications.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = store.save(&key, &payload) {
                warn!(key = %key, error = %e, "background save failed");
                let _ = notifications.send(Notification::warning(format!(
                    "Could not save changes: {e}"
                )));
            } else {
                debug!(key = %key, "background save finished");
            }
        });
    }

    /// Explicit, persistence-confirmed save. Clears the dirty flag only
    /// when the store accepted the write.
    pub fn save_now(&mut self) -> Result<(), StoreError> {
        let payload = document_to_json(self.editor.document())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        match self.store.save(&self.key, &payload) {
            Ok(()) => {
                self.editor.mark_saved();
                debug!(key = %self.key, "document saved");
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "save failed");
                let _ = self
                    .notifications
                    .send(Notification::warning(format!("Could not save changes: {e}")));
                Err(e)
            }
        }
    }

    /// Publish the full document to the configured endpoint. Success and
    /// failure both surface as notifications; local state is never rolled
    /// back.
    pub async fn publish(&self) {
        let Some(publisher) = &self.publisher else {
            let _ = self
                .notifications
                .send(Notification::warning("No publish endpoint configured"));
            return;
        };

        let payload = match serde_json::to_value(self.editor.document()) {
            Ok(payload) => payload,
            Err(e) => {
                let _ = self
                    .notifications
                    .send(Notification::error(format!("Could not serialize site: {e}")));
                return;
            }
        };

        match publisher.publish(&payload).await {
            Ok(()) => {
                let _ = self
                    .notifications
                    .send(Notification::info("Site published"));
            }
            Err(e) => {
                warn!(endpoint = publisher.endpoint(), error = %e, "publish failed");
                let _ = self
                    .notifications
                    .send(Notification::error(format!("Publish failed: {e}")));
            }
        }
    }
}

/// Periodic autosave loop. Saves only when the document is dirty; a tick
/// overlapping a still-running background save is fine because every save
/// writes the full document and the latest write wins.
pub async fn run_autosave(session: Arc<tokio::sync::Mutex<Session>>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick fires immediately; skip it so a fresh session is not
    // saved before anything changed.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let mut session = session.lock().await;
        if session.is_dirty() {
            if let Err(e) = session.save_now() {
                warn!(error = %e, "autosave failed, will retry next tick");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn channel() -> (
        mpsc::UnboundedSender<Notification>,
        mpsc::UnboundedReceiver<Notification>,
    ) {
        mpsc::unbounded_channel()
    }

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn save(&self, _key: &str, _payload: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }

        fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_open_missing_key_starts_fresh() {
        let (tx, _rx) = channel();
        let session = Session::open(Arc::new(MemoryStore::new()), "home", tx);

        assert_eq!(session.editor().document().pages.len(), 1);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn test_open_survives_broken_store() {
        let (tx, mut rx) = channel();
        let mut session = Session::open(Arc::new(BrokenStore), "home", tx);

        // Editing is not blocked by the dead store
        session
            .apply(Mutation::AddSection {
                kind: "banner".to_string(),
                name: None,
                position: None,
                patch: None,
            })
            .unwrap();
        assert_eq!(
            session.editor().current_page().unwrap().sections.len(),
            1
        );

        let note = rx.try_recv().unwrap();
        assert!(note.message.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_save_now_failure_keeps_dirty_and_notifies() {
        let (tx, mut rx) = channel();
        let mut session = Session::open(Arc::new(BrokenStore), "home", tx);
        let _ = rx.try_recv(); // drop the open-time warning

        session
            .apply(Mutation::AddSection {
                kind: "banner".to_string(),
                name: None,
                position: None,
                patch: None,
            })
            .unwrap();

        assert!(session.save_now().is_err());
        assert!(session.is_dirty());

        let note = rx.recv().await.unwrap();
        assert!(note.message.contains("Could not save"));
    }

    #[tokio::test]
    async fn test_autosave_saves_dirty_then_goes_idle() {
        use crate::store::DocumentStore;

        let (tx, _rx) = channel();
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::open(store.clone() as Arc<dyn DocumentStore>, "home", tx);
        session
            .editor_mut()
            .apply(Mutation::AddSection {
                kind: "banner".to_string(),
                name: None,
                position: None,
                patch: None,
            })
            .unwrap();
        assert!(session.is_dirty());

        let shared = Arc::new(tokio::sync::Mutex::new(session));
        let autosave = tokio::spawn(run_autosave(
            Arc::clone(&shared),
            Duration::from_millis(10),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        autosave.abort();

        assert!(!shared.lock().await.is_dirty());
        assert!(store.load("home").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_publish_without_endpoint_notifies() {
        let (tx, mut rx) = channel();
        let session = Session::open(Arc::new(MemoryStore::new()), "home", tx);

        session.publish().await;

        let note = rx.recv().await.unwrap();
        assert_eq!(note.level, crate::NotificationLevel::Warning);
    }
}
