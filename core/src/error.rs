//! Error types for the todo model.
//!
//! # Design
//! Both variants describe input the client got wrong, so neither is ever
//! fatal: the server maps them straight to 400 responses. Storage failures
//! live in the server crate next to the driver that produces them.

use thiserror::Error;

/// Errors raised while validating or translating client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A path identifier is not a 24-digit hex ObjectId.
    #[error("invalid id: {0:?}")]
    InvalidIdentifier(String),
}

impl TodoError {
    pub fn title_required() -> Self {
        TodoError::Validation("the title is required".to_string())
    }
}
