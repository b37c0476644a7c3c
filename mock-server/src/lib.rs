//! In-memory todo collection service.
//!
//! Lists in insertion order and appends; nothing else. Create is routed at
//! `/todos/` only, so a client that drops the trailing slash gets a 405.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub description: Option<String>,
}

pub type Db = Arc<RwLock<Vec<Todo>>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over an existing store, so tests can seed or inspect it.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/", get(list_todos).post(create_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    Json(todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), (StatusCode, Json<Value>)> {
    let description = match input.description {
        Some(d) if !d.is_empty() => d,
        _ => {
            warn!("rejected todo without description");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "description field is required" })),
            ));
        }
    };

    let todo = Todo {
        id: Uuid::new_v4().simple().to_string(),
        description,
    };
    db.write().await.push(todo.clone());
    info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}
