use std::sync::Arc;

use async_trait::async_trait;
use course_core::ProgressSnapshot;
use services::{AppServices, CatalogService, LoadStatus, ProgressStore};
use storage::repository::{KeyValueStore, Storage, StorageError};

#[tokio::test]
async fn progress_survives_a_new_session() {
    let url = "sqlite:file:memdb_progress_sessions?mode=memory&cache=shared";
    let storage = Storage::sqlite(url).await.expect("connect sqlite");

    let first = ProgressStore::new(Arc::clone(&storage.kv));
    assert!(first.mark_complete("html-basics", "intro-to-html").await);
    assert!(first.mark_complete("css-basics", "intro-to-css").await);

    // A second store over the same backend reads what the first one wrote.
    let second = ProgressStore::new(Arc::clone(&storage.kv));
    assert!(second.is_completed("html-basics", "intro-to-html").await);
    assert!(second.is_completed("css-basics", "intro-to-css").await);
    assert_eq!(second.get_all_completed().await.len(), 2);
    assert_eq!(second.load_status().await, LoadStatus::Loaded);
}

#[tokio::test]
async fn app_services_share_one_store() {
    let services = AppServices::from_storage(
        &Storage::in_memory(),
        CatalogService::bundled().expect("bundled catalog"),
    );
    let catalog = services.catalog();
    let course = catalog.course_by_str("web-foundations").expect("course");
    let html = &course.modules()[0];

    assert!(
        services
            .progress_store()
            .mark_complete(html.id().as_str(), html.lessons()[0].id().as_str())
            .await
    );

    let snapshot = services.aggregator().module_progress(html).await;
    assert_eq!(
        snapshot,
        ProgressSnapshot {
            completed: 1,
            total: 2,
            percentage: 50
        }
    );
}

struct UnavailableStore;

#[async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test]
async fn unavailable_storage_never_escapes() {
    let store = ProgressStore::new(Arc::new(UnavailableStore));

    assert!(!store.mark_complete("html-basics", "intro").await);
    assert!(!store.is_completed("html-basics", "intro").await);
    assert!(store.get_all_completed().await.is_empty());
    assert!(!store.reset().await);
    assert_eq!(store.load_status().await, LoadStatus::Unavailable);
}

/// Reads succeed but every write is rejected.
struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(Some(r#"["html-basics:intro"]"#.to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read only".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read only".to_string()))
    }
}

#[tokio::test]
async fn rejected_write_and_reset_keep_previous_state() {
    let store = ProgressStore::new(Arc::new(ReadOnlyStore));

    assert!(!store.mark_complete("html-basics", "elements").await);
    assert!(!store.is_completed("html-basics", "elements").await);

    assert!(!store.reset().await);
    assert!(store.is_completed("html-basics", "intro").await);

    // Already complete: no write is attempted.
    assert!(store.mark_complete("html-basics", "intro").await);
}

#[tokio::test]
async fn concurrent_marks_are_not_lost() {
    let storage = Storage::in_memory();
    let store = Arc::new(ProgressStore::new(Arc::clone(&storage.kv)));

    let mut handles = Vec::new();
    for n in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.mark_complete("module", &format!("lesson-{n}")).await
        }));
    }
    for handle in handles {
        assert!(handle.await.expect("task"));
    }

    let reopened = ProgressStore::new(Arc::clone(&storage.kv));
    assert_eq!(reopened.get_all_completed().await.len(), 16);
}
