//! Handler errors and their HTTP rendering.
//!
//! # Design
//! Every failure a handler can hit is turned into a response here; nothing
//! propagates past the handler. Storage failures carry the message and
//! status chosen by the operation that failed, because listing, saving,
//! updating and deleting each report failure differently.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::TodoError;

use crate::{
    response::{render, MessageBody},
    store::StorageError,
};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Empty title or malformed path id.
    #[error(transparent)]
    Todo(#[from] TodoError),

    /// The request body is not the expected JSON.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// The path id could not be extracted at all, e.g. it is not UTF-8.
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        status: StatusCode,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    /// A storage failure reported as 500.
    pub fn storage(message: &'static str, source: StorageError) -> Self {
        ApiError::Storage {
            message,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            source,
        }
    }

    /// A storage failure reported as 400.
    pub fn storage_rejected(message: &'static str, source: StorageError) -> Self {
        ApiError::Storage {
            message,
            status: StatusCode::BAD_REQUEST,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Todo(_) | ApiError::InvalidBody(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Todo(TodoError::Validation(message)) => MessageBody::new(message),
            ApiError::Todo(TodoError::InvalidIdentifier(_)) => MessageBody::new("invalid id"),
            ApiError::InvalidBody(rejection) => {
                tracing::debug!(%rejection, "rejected request body");
                MessageBody::with_error("invalid request body", rejection.body_text())
            }
            ApiError::InvalidPath(rejection) => {
                tracing::debug!(%rejection, "rejected path");
                MessageBody::with_error("invalid id", rejection.body_text())
            }
            ApiError::Storage {
                message, source, ..
            } => {
                tracing::error!(error = %source, "{message}");
                MessageBody::with_error(message, source.to_string())
            }
        };
        render(status, body)
    }
}
