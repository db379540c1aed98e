//! In-memory `Transport` that records every request and replays scripted
//! responses in order. A reply can be held back until the test releases it,
//! which lets tests interleave overlapping operations on one thread.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;
use todo_sync::{
    ApiError, ClientConfig, HttpRequest, HttpResponse, InputModeController, SyncController, Todo, TodoId,
    Transport,
};

pub const BASE_URL: &str = "http://api.test";

enum Reply {
    Ready(Result<HttpResponse, ApiError>),
    Held(oneshot::Receiver<HttpResponse>),
}

#[derive(Default)]
struct Script {
    requests: Vec<HttpRequest>,
    replies: VecDeque<Reply>,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: &str) {
        self.script
            .borrow_mut()
            .replies
            .push_back(Reply::Ready(Ok(HttpResponse::new(status, body))));
    }

    pub fn reply_json(&self, status: u16, body: serde_json::Value) {
        self.reply(status, &body.to_string());
    }

    pub fn fail(&self, err: ApiError) {
        self.script.borrow_mut().replies.push_back(Reply::Ready(Err(err)));
    }

    /// Queue a reply that only arrives once the returned sender fires.
    pub fn hold(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().replies.push_back(Reply::Held(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script.borrow().requests.len()
    }

    pub fn last_body(&self) -> serde_json::Value {
        let requests = self.requests();
        let body = requests
            .last()
            .and_then(|r| r.body.as_deref())
            .expect("last request has no body");
        serde_json::from_str(body).unwrap()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let reply = {
            let mut script = self.script.borrow_mut();
            script.requests.push(request);
            script.replies.pop_front().expect("no scripted reply left")
        };
        match reply {
            Reply::Ready(result) => result,
            Reply::Held(rx) => rx.await.map_err(|e| ApiError::Transport(e.to_string())),
        }
    }
}

pub struct Harness {
    pub transport: ScriptedTransport,
    pub sync: Rc<SyncController<ScriptedTransport>>,
    pub input: InputModeController<ScriptedTransport>,
}

pub fn harness() -> Harness {
    let transport = ScriptedTransport::default();
    let config = ClientConfig::new().with_base_url(BASE_URL);
    let sync = Rc::new(SyncController::new(&config, transport.clone()));
    let input = InputModeController::new(Rc::clone(&sync));
    Harness {
        transport,
        sync,
        input,
    }
}

pub fn todo(id: &str, title: &str, completed: bool) -> Todo {
    Todo {
        id: TodoId::from(id),
        title: title.to_string(),
        completed,
    }
}

pub fn todo_json(todo: &Todo) -> serde_json::Value {
    serde_json::to_value(todo).unwrap()
}

/// Load `items` into the store through a successful fetch.
pub async fn seed(h: &Harness, items: &[Todo]) {
    h.transport.reply_json(200, serde_json::to_value(items).unwrap());
    h.sync.fetch_all().await.unwrap();
}
