//! Request handlers.
//!
//! - `GET /` - landing page
//! - `GET /health` - store health probe
//! - `GET /todo`, `POST /todo`, `PUT /todo/{id}`, `DELETE /todo/{id}` - CRUD

mod health;
mod todo;

use axum::response::Html;

pub use health::{health_check, HealthResponse};
pub use todo::{create_todo, delete_todo, list_todos, update_todo};

const HOME_PAGE: &str = include_str!("../static/home.html");

/// GET /
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}
