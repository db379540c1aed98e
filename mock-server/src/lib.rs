use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Full replacement body for `PUT /todos/{id}`. Any `id` in the body is
/// ignored; the path decides which item changes.
#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Insertion-ordered so `GET /todos` is stable across calls.
pub type Db = Arc<RwLock<Vec<Todo>>>;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

fn not_found() -> (StatusCode, Json<ErrorBody>) {
    error(StatusCode::NOT_FOUND, "todo not found")
}

pub fn app() -> Router {
    app_with_db(Db::default())
}

/// Router over a caller-supplied store, letting tests seed or inspect it.
pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    Json(db.read().await.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    if input.title.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "title must not be empty"));
    }
    let todo = Todo {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        completed: false,
    };
    info!(id = %todo.id, "created todo");
    db.write().await.push(todo.clone());
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Todo>> {
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> ApiResult<Json<Todo>> {
    if input.title.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "title must not be empty"));
    }
    let mut todos = db.write().await;
    let todo = todos.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
    todo.title = input.title;
    todo.completed = input.completed;
    info!(%id, completed = todo.completed, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err(not_found());
    }
    info!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_to_json() {
        let todo = Todo {
            id: "1".to_string(),
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_todo_ignores_extra_fields() {
        let input: CreateTodo =
            serde_json::from_str(r#"{"title":"Done","completed":true}"#).unwrap();
        assert_eq!(input.title, "Done");
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_requires_full_body() {
        let result: Result<UpdateTodo, _> = serde_json::from_str(r#"{"title":"New title"}"#);
        assert!(result.is_err());
        let input: UpdateTodo =
            serde_json::from_str(r#"{"id":"other","title":"New title","completed":true}"#).unwrap();
        assert_eq!(input.title, "New title");
        assert!(input.completed);
    }

    #[test]
    fn error_body_has_message_field() {
        let (status, Json(body)) = not_found();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({"message": "todo not found"}));
    }
}
