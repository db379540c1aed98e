//! Remote CRUD calls reconciled into the local store.
//!
//! # Design
//! Each operation is one round trip: build the request, await the
//! `Transport`, parse the response, then either apply a `TodoStore`
//! transition or write the `ErrorChannel`, never both. The error slot is
//! cleared before the request goes out. State is held in `watch` senders
//! and only touched after the await resumes, so overlapping operations on
//! one thread settle in completion order without any locking.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::error_channel::ErrorChannel;
use crate::http::{HttpRequest, HttpResponse};
use crate::store::TodoStore;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Todo, TodoId};

pub struct SyncController<T> {
    client: TodoClient,
    transport: T,
    store: watch::Sender<TodoStore>,
    errors: ErrorChannel,
}

impl SyncController<ReqwestTransport> {
    /// Controller talking HTTP to `config.base_url`.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> SyncController<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        let (store, _) = watch::channel(TodoStore::new());
        Self {
            client: TodoClient::new(&config.base_url),
            transport,
            store,
            errors: ErrorChannel::new(),
        }
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> TodoStore {
        self.store.borrow().clone()
    }

    /// Receiver woken on every store transition.
    pub fn subscribe(&self) -> watch::Receiver<TodoStore> {
        self.store.subscribe()
    }

    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    /// Replace the collection with the server's list. Only this operation
    /// drives the loading flag.
    pub async fn fetch_all(&self) -> Result<Vec<Todo>, ApiError> {
        self.store.send_modify(|s| *s = s.with_loading(true));
        let result = self
            .exchange(Operation::Fetch, Ok(self.client.build_list_todos()), TodoClient::parse_list_todos)
            .await;
        match result {
            Ok(items) => {
                let fetched = items.clone();
                self.store
                    .send_modify(|s| *s = s.replace_all(items).with_loading(false));
                Ok(fetched)
            }
            Err(err) => {
                self.store.send_modify(|s| *s = s.with_loading(false));
                Err(err)
            }
        }
    }

    /// Create a todo and append the server's copy.
    pub async fn create(&self, title: &str) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(title);
        let created = self
            .exchange(Operation::Create, request, TodoClient::parse_create_todo)
            .await?;
        self.store.send_modify(|s| *s = s.append(created.clone()));
        Ok(created)
    }

    /// Flip `completed`. The store receives the payload that was sent.
    pub async fn toggle(&self, item: &Todo) -> Result<Todo, ApiError> {
        let payload = item.toggled();
        self.put(Operation::Toggle, payload).await
    }

    /// Retitle the stored item `id` with `title` trimmed. The rest of the
    /// body comes from the current snapshot.
    pub async fn update(&self, id: &TodoId, title: &str) -> Result<Todo, ApiError> {
        let current = self.snapshot().get(id).cloned();
        let Some(current) = current else {
            self.errors.clear();
            let err = ApiError::validation(format!("todo {id} is not in the collection"));
            return Err(self.fail(Operation::Update, err));
        };
        self.put(Operation::Update, current.retitled(title.trim())).await
    }

    pub async fn remove(&self, id: &TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        self.exchange(Operation::Delete, Ok(request), TodoClient::parse_delete_todo)
            .await?;
        self.store.send_modify(|s| *s = s.remove_by_id(id));
        Ok(())
    }

    async fn put(&self, op: Operation, payload: Todo) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(&payload);
        // The server's echo must parse, but the sent payload is what lands
        // in the store.
        self.exchange(op, request, TodoClient::parse_update_todo).await?;
        self.store
            .send_modify(|s| *s = s.replace_by_id(&payload.id, payload.clone()));
        Ok(payload)
    }

    /// Clear the error slot, run one round trip, and report any failure to
    /// the `ErrorChannel` before handing it back.
    async fn exchange<R>(
        &self,
        op: Operation,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        self.errors.clear();
        let request = request.map_err(|e| self.fail(op, e))?;
        debug!(%op, method = request.method.as_str(), path = %request.path, "issuing request");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| self.fail(op, e))?;
        debug!(%op, status = response.status, "request settled");

        parse(&self.client, response).map_err(|e| self.fail(op, e))
    }

    fn fail(&self, op: Operation, err: ApiError) -> ApiError {
        warn!(%op, status = ?err.status(), error = %err, "operation failed");
        self.errors.set(op.failure_message(&err));
        err
    }
}
