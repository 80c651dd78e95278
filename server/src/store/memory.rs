//! In-process `TodoStore`.
//!
//! Records are kept in insertion order, which stands in for the natural order
//! of a document collection. Closing the store makes every later call fail
//! with `StorageError::Unavailable`, which is how tests exercise storage
//! failure paths.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::{TodoId, TodoPatch, TodoRecord};

use super::{StorageError, TodoStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryTodoStore {
    records: Arc<RwLock<Vec<TodoRecord>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `records`.
    pub fn with_records(records: Vec<TodoRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            closed: Arc::default(),
        }
    }

    /// Current contents, bypassing the closed check.
    pub async fn snapshot(&self) -> Vec<TodoRecord> {
        self.records.read().await.clone()
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Unavailable("memory store is closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StorageError> {
        self.ensure_open()?;
        Ok(self.records.read().await.clone())
    }

    async fn insert(&self, record: &TodoRecord) -> Result<TodoId, StorageError> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StorageError::Conflict(format!("duplicate id {}", record.id)));
        }
        records.push(record.clone());
        Ok(record.id)
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<bool, StorageError> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == *id) {
            Some(record) => {
                record.title = patch.title.clone();
                record.completed = patch.completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &TodoId) -> Result<bool, StorageError> {
        self.ensure_open()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != *id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use todo_core::{to_storage, CreateTodo};

    use super::*;

    fn record(title: &str) -> TodoRecord {
        to_storage(
            CreateTodo {
                title: title.to_string(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryTodoStore::new();
        let first = record("first");
        let second = record("second");
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryTodoStore::new();
        let rec = record("once");
        store.insert(&rec).await.unwrap();
        let err = store.insert(&rec).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)), "{err:?}");
        assert_eq!(err.to_string(), format!("conflict: duplicate id {}", rec.id));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn update_changes_only_title_and_flag() {
        let rec = record("old");
        let store = MemoryTodoStore::with_records(vec![rec.clone()]);
        let patch = TodoPatch {
            title: "new".to_string(),
            completed: true,
        };

        assert!(store.update(&rec.id, &patch).await.unwrap());

        let stored = &store.snapshot().await[0];
        assert_eq!(stored.id, rec.id);
        assert_eq!(stored.created_at, rec.created_at);
        assert_eq!(stored.title, "new");
        assert!(stored.completed);
    }

    #[tokio::test]
    async fn update_and_delete_miss_are_noops() {
        let rec = record("keep");
        let store = MemoryTodoStore::with_records(vec![rec.clone()]);
        let other = TodoId::generate();
        let patch = TodoPatch {
            title: "changed".to_string(),
            completed: true,
        };

        assert!(!store.update(&other, &patch).await.unwrap());
        assert!(!store.delete(&other).await.unwrap());
        assert_eq!(store.snapshot().await, vec![rec]);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let rec = record("gone");
        let store = MemoryTodoStore::with_records(vec![rec.clone()]);
        assert!(store.delete(&rec.id).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn closed_store_fails_every_call() {
        let store = MemoryTodoStore::new();
        store.close().await;

        assert!(matches!(store.ping().await, Err(StorageError::Unavailable(_))));
        assert!(store.list_all().await.is_err());
        assert!(store.insert(&record("late")).await.is_err());
    }
}
