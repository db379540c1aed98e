//! Client-side synchronization core for a REST todo store.
//!
//! # Overview
//! Keeps a local, ordered todo collection consistent with a remote REST
//! endpoint and mediates one shared text input between adding a new item
//! and editing an existing one.
//!
//! # Design
//! - `TodoClient` is the stateless wire codec: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `Transport` is the only place that performs I/O; `ReqwestTransport`
//!   is the production implementation.
//! - `SyncController` runs one round trip per operation and reconciles the
//!   result into an immutable `TodoStore` snapshot or the `ErrorChannel`.
//! - `InputModeController` owns the draft and the Adding/Editing mode and
//!   routes `submit` to create or update.
//! - Every piece of state is published through `tokio::sync::watch`, so a
//!   renderer can read the current snapshot or await the next change.
//! - Everything runs on one logical thread; no locks are involved.

pub mod client;
pub mod config;
pub mod error;
pub mod error_channel;
pub mod http;
pub mod mode;
pub mod store;
pub mod sync;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use error_channel::ErrorChannel;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mode::{InputMode, InputModeController, InputState};
pub use store::TodoStore;
pub use sync::SyncController;
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTodo, Todo, TodoId};
