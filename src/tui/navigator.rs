//! # Navigator
//!
//! The TUI's [`Screens`] implementation. Flows run as background tasks and
//! never touch the stack: the navigator sends a [`StackCommand`] to the event
//! loop, which owns the [`ScreenStack`], and then awaits the pushed screen's
//! completion.
//!
//! ```text
//! flow task ──Push(id, screen)──▶ event loop ──push──▶ ScreenStack
//!     ▲                                                   │ resolve + pop
//!     └──────────────── Pending::wait() ◀── dispose ──────┘
//! ```
//!
//! If the loop has already exited, the command (and the screen's completion
//! with it) is dropped, so every pending dialog reads as `Cancelled`.
//!
//! [`ScreenStack`]: crate::core::screen_stack::ScreenStack

use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use crate::core::documents::DocumentRecord;
use crate::core::navigation::Screens;
use crate::core::screen_stack::{completion, ScreenId, ScreenIds, ScreenResult};
use crate::tui::components::{
    ConfirmState, EditorState, LoadingState, MessageState, NameInputState,
};
use crate::tui::screen::Screen;

/// Requests applied to the stack by the event loop.
pub enum StackCommand {
    Push(ScreenId, Screen),
    /// Resolve a screen from outside (loading indicators).
    Dismiss(ScreenId),
    /// Answer to an editor's clear confirmation; the editor accepts input again.
    FinishClear { editor: ScreenId, confirmed: bool },
    /// Start a background re-read of the document list.
    RefreshListing,
    /// A finished listing, delivered to the root screen.
    Listing(Result<Vec<DocumentRecord>, String>),
}

#[derive(Clone)]
pub struct Navigator {
    tx: mpsc::Sender<StackCommand>,
    ids: Arc<ScreenIds>,
}

impl Navigator {
    pub fn new(tx: mpsc::Sender<StackCommand>) -> Self {
        Self {
            tx,
            ids: Arc::new(ScreenIds::new()),
        }
    }

    /// Deliver the clear confirmation answer to an editor.
    pub fn finish_clear(&self, editor: ScreenId, confirmed: bool) {
        self.send(StackCommand::FinishClear { editor, confirmed });
    }

    fn push(&self, screen: Screen) -> ScreenId {
        let id = self.ids.next();
        self.send(StackCommand::Push(id, screen));
        id
    }

    fn send(&self, command: StackCommand) {
        if self.tx.send(command).is_err() {
            debug!("Event loop gone, dropping stack command");
        }
    }
}

#[async_trait]
impl Screens for Navigator {
    async fn prompt_name(&self) -> ScreenResult<String> {
        let (completion, pending) = completion();
        self.push(Screen::NameInput {
            state: NameInputState::new(),
            completion,
        });
        pending.wait().await
    }

    async fn edit_document(&self, path: PathBuf, content: String) -> ScreenResult<String> {
        let (completion, pending) = completion();
        self.push(Screen::Editor {
            state: EditorState::new(path, content),
            completion,
        });
        pending.wait().await
    }

    async fn confirm(&self, title: String, message: String) -> ScreenResult<bool> {
        let (completion, pending) = completion();
        self.push(Screen::Confirm {
            state: ConfirmState::new(title, message),
            completion,
        });
        pending.wait().await
    }

    fn show_loading(&self, message: String) -> ScreenId {
        // Nobody waits on a loading screen; it is closed through `dismiss`
        let (completion, _pending) = completion();
        self.push(Screen::Loading {
            state: LoadingState::new(message),
            completion,
        })
    }

    fn dismiss(&self, id: ScreenId) {
        self.send(StackCommand::Dismiss(id));
    }

    async fn show_message(&self, title: String, message: String) {
        let (completion, pending) = completion();
        self.push(Screen::Message {
            state: MessageState::new(title, message),
            completion,
        });
        pending.wait().await;
    }

    fn refresh_listing(&self) {
        self.send(StackCommand::RefreshListing);
    }
}
