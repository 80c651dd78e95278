//! Wire and storage representations of a todo item.
//!
//! # Design
//! `TodoItem` is what HTTP clients see: a hex string id and an RFC 3339
//! `create_at`. `TodoRecord` is what the document store holds: an `_id`
//! ObjectId and a BSON datetime under `createAt`. The two are kept as
//! separate types so neither format leaks into the other; `translate` is the
//! only place that converts between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TodoId;

/// A todo item as exchanged with HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub create_at: DateTime<Utc>,
}

/// A todo item as persisted in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "createAt")]
    pub created_at: bson::DateTime,
}

/// Request payload for creating a new todo.
///
/// Only the title is taken from the client. A missing title decodes as an
/// empty string so that it is reported as a validation failure rather than a
/// decode failure. Any other fields in the body are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub title: String,
}

/// Request payload for updating an existing todo. Both fields are written;
/// an omitted `completed` resets the flag to false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// The validated set of fields an update is allowed to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: String,
    pub completed: bool,
}
