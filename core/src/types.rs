//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Ids are opaque strings assigned by the server; the client never parses or
//! generates them. Integration tests catch any schema drift between the two
//! crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier. Treated as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId(s.to_string())
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        TodoId(s)
    }
}

/// A single todo item as exchanged with the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// Copy of this todo with `completed` inverted.
    pub fn toggled(&self) -> Todo {
        Todo {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Copy of this todo carrying a new title.
    pub fn retitled(&self, title: &str) -> Todo {
        Todo {
            title: title.to_string(),
            ..self.clone()
        }
    }
}

/// Request payload for creating a new todo. The server assigns `id` and
/// starts every item as not completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Shape of a non-success response body. Any JSON object is accepted;
/// only `message` is read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
