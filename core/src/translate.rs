//! Conversions between request payloads, storage records and wire items.
//!
//! Validation happens here, before anything reaches the store: an empty
//! title never produces a `TodoRecord` or a `TodoPatch`.

use chrono::{DateTime, Utc};

use crate::error::TodoError;
use crate::id::TodoId;
use crate::types::{CreateTodo, TodoItem, TodoPatch, TodoRecord, UpdateTodo};

impl From<TodoRecord> for TodoItem {
    fn from(record: TodoRecord) -> Self {
        TodoItem {
            id: record.id.to_hex(),
            title: record.title,
            completed: record.completed,
            create_at: record.created_at.to_chrono(),
        }
    }
}

/// Build a new storage record from a create request.
///
/// A fresh id is generated and `now` becomes the creation timestamp; the
/// item always starts out not completed.
pub fn to_storage(input: CreateTodo, now: DateTime<Utc>) -> Result<TodoRecord, TodoError> {
    let title = require_title(input.title)?;
    Ok(TodoRecord {
        id: TodoId::generate(),
        title,
        completed: false,
        created_at: bson::DateTime::from_chrono(now),
    })
}

/// Validate an update request into the fields it may change.
pub fn to_patch(input: UpdateTodo) -> Result<TodoPatch, TodoError> {
    let title = require_title(input.title)?;
    Ok(TodoPatch {
        title,
        completed: input.completed,
    })
}

fn require_title(title: String) -> Result<String, TodoError> {
    if title.is_empty() {
        return Err(TodoError::title_required());
    }
    Ok(title)
}
