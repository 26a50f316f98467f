//! Save/load round trips through a real file store.
//!
//! These tests mutate through the editor directly so the only write is the
//! explicit `save_now`; background saves from `Session::apply` are
//! fire-and-forget and would race the assertions.

use pagecraft_document::BannerPatch;
use pagecraft_editor::{Mutation, SectionPatch};
use pagecraft_workspace::{FileStore, MemoryStore, Session};
use std::sync::Arc;
use tokio::sync::mpsc;

fn open(store: Arc<dyn pagecraft_workspace::DocumentStore>, key: &str) -> Session {
    let (tx, _rx) = mpsc::unbounded_channel();
    Session::open(store, key, tx)
}

#[tokio::test]
async fn test_file_store_round_trip_reproduces_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()));

    let saved = {
        let mut session = open(store.clone(), "site");
        session
            .editor_mut()
            .apply(Mutation::AddSection {
                kind: "banner".to_string(),
                name: Some("Promo".to_string()),
                position: None,
                patch: Some(SectionPatch::Banner(BannerPatch {
                    text: Some("Free shipping".to_string()),
                    ..Default::default()
                })),
            })
            .unwrap();
        session
            .editor_mut()
            .apply(Mutation::AddPage {
                name: "About".to_string(),
                path: "/about".to_string(),
            })
            .unwrap();

        session.save_now().unwrap();
        assert!(!session.is_dirty());
        session.editor().document().clone()
    };

    let reopened = open(store, "site");
    assert_eq!(reopened.editor().document(), &saved);
}

#[tokio::test]
async fn test_undo_state_persists_through_explicit_save() {
    let store = Arc::new(MemoryStore::new());

    let mut session = open(store.clone(), "site");
    session
        .editor_mut()
        .apply(Mutation::AddSection {
            kind: "hero-1".to_string(),
            name: None,
            position: None,
            patch: None,
        })
        .unwrap();
    assert!(session.editor_mut().undo());
    session.save_now().unwrap();

    let reopened = open(store, "site");
    assert!(reopened
        .editor()
        .current_page()
        .unwrap()
        .sections
        .is_empty());
}

#[tokio::test]
async fn test_corrupt_payload_falls_back_to_default() {
    use pagecraft_workspace::DocumentStore;

    let store = Arc::new(MemoryStore::new());
    store.save("site", "not json at all").unwrap();

    let session = open(store, "site");
    assert_eq!(session.editor().document().pages.len(), 1);
}
