//! Error types for the todo sync client.
//!
//! # Design
//! Every failure is caught at the operation boundary and turned into one
//! human-readable line for the `ErrorChannel`. `ApiError` keeps the
//! structured cause for programmatic callers; `Operation::failure_message`
//! produces the line users see.

use std::fmt;

use thiserror::Error;

/// Errors produced by the codec, the transport, and the controllers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Local input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-success status. `message` is taken
    /// from the response body when present, otherwise a generic
    /// status-coded text.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A success response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response (connection refused, reset...).
    #[error("network error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Fallback used when an error response carries no `message`.
    pub fn generic_http(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("HTTP error, status {status}"),
        }
    }

    /// Status code, if the error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The remote operations a controller can attempt. Used to prefix the
/// message written to the `ErrorChannel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Toggle,
    Update,
    Delete,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Fetch => "fetch todos",
            Operation::Create => "add todo",
            Operation::Toggle => "toggle todo",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
        }
    }

    pub fn failure_message(&self, err: &ApiError) -> String {
        format!("Failed to {}: {err}", self.label())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_is_used_verbatim() {
        let err = ApiError::Http {
            status: 500,
            message: "db down".to_string(),
        };
        assert_eq!(Operation::Update.failure_message(&err), "Failed to update todo: db down");
    }

    #[test]
    fn generic_http_mentions_status() {
        let err = ApiError::generic_http(503);
        assert_eq!(err.to_string(), "HTTP error, status 503");
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            Operation::Delete.failure_message(&err),
            "Failed to delete todo: HTTP error, status 503"
        );
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(ApiError::Parse("eof".into()).status(), None);
        assert_eq!(ApiError::validation("empty").status(), None);
    }
}
