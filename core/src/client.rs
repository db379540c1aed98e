//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each remote operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The `SyncController` executes the round-trip in between through its
//! `Transport`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ErrorBody, Todo, TodoId};

/// Wire codec for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, title: &str) -> Result<HttpRequest, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(json_request(HttpMethod::Post, format!("{}/todos", self.base_url), body))
    }

    /// PUT the full todo. Used for both toggling and retitling.
    pub fn build_update_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(todo).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(json_request(HttpMethod::Put, self.item_path(&todo.id), body))
    }

    pub fn build_delete_todo(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    /// Accepts 200 or 201; any other 2xx is still treated as success.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        parse_body(&response)
    }

    /// Any 2xx counts as success; the body (usually empty on 204) is ignored.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn item_path(&self, id: &TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

fn json_request(method: HttpMethod, path: String, body: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    }
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Map non-success status codes to `ApiError::Http`, preferring the
/// server's `message` over the generic status text.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty());
    match message {
        Some(message) => Err(ApiError::Http {
            status: response.status,
            message,
        }),
        None => Err(ApiError::generic_http(response.status)),
    }
}
