//! Todo CRUD handlers.
//!
//! Each handler validates its input completely before touching the store and
//! performs at most one store call. Path and body extraction are taken as a
//! `Result` so that a malformed path id is reported ahead of a malformed body,
//! and so that extraction failures get this service's 400 body instead of
//! axum's plain-text default.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use todo_core::{to_patch, to_storage, CreateTodo, TodoId, TodoItem, UpdateTodo};

use crate::{
    error::ApiError,
    response::{render, ApiResponse, CreatedBody, MessageBody},
    AppState,
};

/// GET /todo
#[tracing::instrument(skip_all)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state
        .store
        .list_all()
        .await
        .map_err(|e| ApiError::storage("failed to fetch todo", e))?;

    let items: Vec<TodoItem> = records.into_iter().map(TodoItem::from).collect();
    Ok(render(StatusCode::OK, ApiResponse::new(items)))
}

/// POST /todo
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = payload?;
    let record = to_storage(input, Utc::now())?;

    let id = state
        .store
        .insert(&record)
        .await
        .map_err(|e| ApiError::storage("failed to save todo", e))?;
    tracing::info!(%id, "todo created");

    Ok(render(
        StatusCode::OK,
        CreatedBody {
            message: "todo created successfully".to_string(),
            todo_id: id.to_hex(),
        },
    ))
}

/// PUT /todo/{id}
#[tracing::instrument(skip_all)]
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(raw_id) = path?;
    let id: TodoId = raw_id.parse()?;
    let Json(input) = payload?;
    let patch = to_patch(input)?;

    let matched = state
        .store
        .update(&id, &patch)
        .await
        .map_err(|e| ApiError::storage("failed to update todo", e))?;
    if !matched {
        tracing::debug!(%id, "update matched no todo");
    }

    Ok(render(StatusCode::OK, MessageBody::new("todo updated successfully")))
}

/// DELETE /todo/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(raw_id) = path?;
    let id: TodoId = raw_id.parse()?;

    let deleted = state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::storage_rejected("failed to delete todo", e))?;
    if !deleted {
        tracing::debug!(%id, "delete matched no todo");
    }

    Ok(render(StatusCode::OK, MessageBody::new("todo deleted successfully")))
}
