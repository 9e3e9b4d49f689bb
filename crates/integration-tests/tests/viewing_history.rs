//! Viewing history persisted through file-backed client storage.

use techpulse_core::{Category, MAX_HISTORY_LENGTH, ProductId};
use techpulse_integration_tests::product;
use techpulse_storefront::session::{HISTORY_STORAGE_KEY, HistorySession};
use techpulse_storefront::storage::{FileStorage, LocalStorage};

#[test]
fn test_history_is_bounded_most_recent_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = HistorySession::load(FileStorage::new(dir.path()));

    for i in 0..7 {
        session.record(&product(&format!("p{i}"), Category::Audio, 1_000));
    }

    let ids: Vec<&str> = session.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), MAX_HISTORY_LENGTH);
    assert_eq!(ids, vec!["p6", "p5", "p4", "p3", "p2"]);
}

#[test]
fn test_revisit_moves_product_to_front() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = HistorySession::load(FileStorage::new(dir.path()));
    session.record(&product("a", Category::Audio, 1_000));
    session.record(&product("b", Category::Audio, 1_000));
    session.record(&product("a", Category::Audio, 1_000));

    let reopened = HistorySession::load(FileStorage::new(dir.path()));
    let ids: Vec<&str> = reopened.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(
        reopened
            .excluding(&ProductId::new("a"))
            .iter()
            .map(|e| e.id.as_str())
            .collect::<Vec<_>>(),
        vec!["b"]
    );
}

#[test]
fn test_malformed_history_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    FileStorage::new(dir.path())
        .set_item(HISTORY_STORAGE_KEY, "[{\"id\": 42}]")
        .expect("write");

    let session = HistorySession::load(FileStorage::new(dir.path()));
    assert!(session.entries().is_empty());
}
