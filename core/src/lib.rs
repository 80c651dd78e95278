//! Model core for the todo service.
//!
//! # Overview
//! Defines the todo item in its two shapes (JSON for HTTP clients, BSON
//! document for the store) and the translation between them. Nothing here
//! performs I/O, so every rule about ids, titles and timestamps is testable
//! without a database.
//!
//! # Design
//! - `TodoId` wraps the store's 12-byte ObjectId; its external form is hex.
//! - `translate` is the single place where request payloads become storage
//!   records and records become wire items.
//! - Validation errors are plain values; the server decides their status.

pub mod error;
pub mod id;
pub mod translate;
pub mod types;

pub use error::TodoError;
pub use id::TodoId;
pub use translate::{to_patch, to_storage};
pub use types::{CreateTodo, TodoItem, TodoPatch, TodoRecord, UpdateTodo};
