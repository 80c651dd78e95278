//! Storage gateway for todo records.
//!
//! # Design
//! Handlers only ever see `Arc<dyn TodoStore>`. The MongoDB implementation is
//! what production runs against; the in-memory implementation backs local
//! runs without a database and the test suites. Neither retries: a failed
//! operation is reported to the caller as-is.

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use todo_core::{TodoId, TodoPatch, TodoRecord};

use crate::config::StorageConfig;

pub use memory::MemoryTodoStore;
pub use mongo::MongoTodoStore;

/// Errors reported by a `TodoStore`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The MongoDB driver failed: connection, server selection, command or
    /// document (de)serialization.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The store has been closed or cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A record with the same id is already stored.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// A collection of todo records.
///
/// `update` and `delete` report whether a record matched; a miss is not an
/// error.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every stored record, in the store's natural order.
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StorageError>;

    /// Persist a new record and return its id.
    async fn insert(&self, record: &TodoRecord) -> Result<TodoId, StorageError>;

    /// Overwrite title and completed flag of the matching record.
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<bool, StorageError>;

    /// Remove the matching record.
    async fn delete(&self, id: &TodoId) -> Result<bool, StorageError>;

    /// Health probe.
    async fn ping(&self) -> Result<(), StorageError>;

    /// Release connections. Later calls fail.
    async fn close(&self);
}

/// Open the store selected by configuration.
///
/// For MongoDB this connects and pings, so a failure here means the database
/// is unreachable.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn TodoStore>, StorageError> {
    match config {
        StorageConfig::Mongo(mongo) => {
            let store = MongoTodoStore::connect(mongo).await?;
            Ok(Arc::new(store))
        }
        StorageConfig::Memory => {
            tracing::warn!("using in-memory todo store; data is lost on exit");
            Ok(Arc::new(MemoryTodoStore::new()))
        }
    }
}
