//! The shared input: one draft, one submit action, two modes.
//!
//! `submit` means "add" while `Adding` and "update" while `Editing`; the
//! caller never chooses. Mode and draft live together in one `InputState`
//! so observers never see a target without its matching draft.

use std::rc::Rc;

use tokio::sync::watch;
use tracing::debug;

use crate::error::ApiError;
use crate::sync::SyncController;
use crate::transport::Transport;
use crate::types::Todo;

pub const EMPTY_TITLE_MESSAGE: &str = "Todo title cannot be empty";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Adding,
    Editing(Todo),
}

impl InputMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, InputMode::Editing(_))
    }

    pub fn target(&self) -> Option<&Todo> {
        match self {
            InputMode::Adding => None,
            InputMode::Editing(todo) => Some(todo),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub mode: InputMode,
    pub draft: String,
}

pub struct InputModeController<T> {
    sync: Rc<SyncController<T>>,
    state: watch::Sender<InputState>,
}

impl<T: Transport> InputModeController<T> {
    pub fn new(sync: Rc<SyncController<T>>) -> Self {
        let (state, _) = watch::channel(InputState::default());
        Self { sync, state }
    }

    pub fn sync(&self) -> &SyncController<T> {
        &self.sync
    }

    pub fn snapshot(&self) -> InputState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<InputState> {
        self.state.subscribe()
    }

    pub fn mode(&self) -> InputMode {
        self.state.borrow().mode.clone()
    }

    pub fn draft(&self) -> String {
        self.state.borrow().draft.clone()
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|s| {
            if s.draft == text {
                return false;
            }
            s.draft = text;
            true
        });
    }

    pub fn start_edit(&self, todo: &Todo) {
        self.sync.errors().clear();
        debug!(id = %todo.id, "editing todo");
        self.state.send_replace(InputState {
            mode: InputMode::Editing(todo.clone()),
            draft: todo.title.clone(),
        });
    }

    /// Back to `Adding` with an empty draft. In `Adding` only the error
    /// slot is cleared.
    pub fn cancel_edit(&self) {
        self.sync.errors().clear();
        self.state.send_if_modified(|s| {
            if !s.mode.is_editing() {
                return false;
            }
            *s = InputState::default();
            true
        });
    }

    /// Create or update depending on the current mode. Blank drafts fail
    /// locally without touching the network. On failure the draft and mode
    /// are kept so the user can retry. On success the input is only reset
    /// if the user has not moved to another mode or target meanwhile.
    pub async fn submit(&self) -> Result<(), ApiError> {
        let InputState { mode, draft } = self.snapshot();
        let errors = self.sync.errors();
        errors.clear();

        if draft.trim().is_empty() {
            let err = ApiError::validation(EMPTY_TITLE_MESSAGE);
            errors.set(err.to_string());
            return Err(err);
        }

        match mode {
            InputMode::Adding => {
                self.sync.create(&draft).await?;
                self.state.send_if_modified(|s| {
                    if s.mode.is_editing() || s.draft.is_empty() {
                        return false;
                    }
                    s.draft.clear();
                    true
                });
            }
            InputMode::Editing(target) => {
                self.sync.update(&target.id, &draft).await?;
                self.state.send_if_modified(|s| {
                    if s.mode.target().map(|t| &t.id) != Some(&target.id) {
                        return false;
                    }
                    *s = InputState::default();
                    true
                });
            }
        }
        Ok(())
    }
}
