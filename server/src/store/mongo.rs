//! MongoDB-backed `TodoStore`.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Client, Collection, Database,
};
use todo_core::{TodoId, TodoPatch, TodoRecord};

use super::{StorageError, TodoStore};
use crate::config::MongoConfig;

/// A single collection handle on a shared, internally pooled client.
#[derive(Debug, Clone)]
pub struct MongoTodoStore {
    client: Client,
    database: Database,
    collection: Collection<TodoRecord>,
}

impl MongoTodoStore {
    /// Connect to `config.uri` and verify the server answers a ping.
    #[tracing::instrument(skip_all, fields(database = %config.database, collection = %config.collection))]
    pub async fn connect(config: &MongoConfig) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        let collection = database.collection::<TodoRecord>(&config.collection);
        let store = Self {
            client,
            database,
            collection,
        };

        store.ping().await?;
        tracing::info!("connected to MongoDB");
        Ok(store)
    }
}

fn by_id(id: &TodoId) -> Document {
    doc! { "_id": *id.as_object_id() }
}

/// Full replacement of the two mutable fields.
fn set_patch(patch: &TodoPatch) -> Document {
    doc! {
        "$set": {
            "title": patch.title.as_str(),
            "completed": patch.completed,
        }
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn list_all(&self) -> Result<Vec<TodoRecord>, StorageError> {
        let cursor = self.collection.find(doc! {}).await?;
        let records: Vec<TodoRecord> = cursor.try_collect().await?;
        tracing::debug!(count = records.len(), "fetched todos");
        Ok(records)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id))]
    async fn insert(&self, record: &TodoRecord) -> Result<TodoId, StorageError> {
        self.collection.insert_one(record).await?;
        Ok(record.id)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<bool, StorageError> {
        let result = self
            .collection
            .update_one(by_id(id), set_patch(patch))
            .await?;
        Ok(result.matched_count > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &TodoId) -> Result<bool, StorageError> {
        let result = self.collection.delete_one(by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn close(&self) {
        self.client.clone().shutdown().immediate(true).await;
        tracing::info!("MongoDB client shut down");
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{oid::ObjectId, Bson};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filter_matches_on_object_id() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let id = TodoId::parse("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(by_id(&id), doc! { "_id": oid });
    }

    #[test]
    fn update_sets_stored_field_names() {
        let patch = TodoPatch {
            title: "buy oat milk".to_string(),
            completed: true,
        };
        let update = set_patch(&patch);
        assert_eq!(
            update,
            doc! { "$set": { "title": "buy oat milk", "completed": true } }
        );

        let fields: Vec<&str> = update
            .get_document("$set")
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(fields, vec!["title", "completed"]);
    }

    #[test]
    fn update_field_names_match_record_serialization() {
        let record = todo_core::to_storage(
            todo_core::CreateTodo {
                title: "x".to_string(),
            },
            chrono::Utc::now(),
        )
        .unwrap();
        let stored = mongodb::bson::to_document(&record).unwrap();
        let update = set_patch(&TodoPatch {
            title: "y".to_string(),
            completed: false,
        });

        for field in update.get_document("$set").unwrap().keys() {
            assert!(stored.contains_key(field), "{field} is not a stored field");
        }
        assert_eq!(stored.get("completed"), Some(&Bson::Boolean(false)));
    }
}
