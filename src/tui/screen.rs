//! # Screens
//!
//! The concrete screen type held by the TUI's [`ScreenStack`]. Each variant
//! pairs a component's persistent state with the typed completion handed out
//! when it was pushed.
//!
//! Component events are turned into one of two things:
//! - a result recorded on the completion (the stack pops and disposes the
//!   screen on the next pass)
//! - a [`ScreenRequest`] the event loop acts on (start a flow, quit, ...)
//!
//! [`ScreenStack`]: crate::core::screen_stack::ScreenStack

use log::debug;

use crate::core::documents::DocumentRecord;
use crate::core::screen_stack::{Completion, ScreenResult, StackScreen};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConfirmEvent, ConfirmState, EditorEvent, EditorState, FileListEvent, FileListState,
    LoadingState, MessageEvent, MessageState, NameInputEvent, NameInputState,
};
use crate::tui::event::TuiEvent;

pub enum Screen {
    /// Root document list; never resolves.
    Documents(FileListState),
    Editor {
        state: EditorState,
        completion: Completion<String>,
    },
    NameInput {
        state: NameInputState,
        completion: Completion<String>,
    },
    Confirm {
        state: ConfirmState,
        completion: Completion<bool>,
    },
    Message {
        state: MessageState,
        completion: Completion<()>,
    },
    Loading {
        state: LoadingState,
        completion: Completion<()>,
    },
}

/// Work a screen asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Quit,
    NewDocument,
    Convert(DocumentRecord),
    /// The editor wants its buffer cleared, pending confirmation.
    ConfirmClear,
}

impl Screen {
    /// Screens that cover the whole terminal. Dialogs are drawn over the
    /// nearest one beneath them.
    pub fn is_full_screen(&self) -> bool {
        matches!(self, Screen::Documents(_) | Screen::Editor { .. })
    }

    /// Route an input event to the component. Screens already resolving
    /// ignore input until they are popped.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ScreenRequest> {
        if self.is_resolving() {
            return None;
        }

        match self {
            Screen::Documents(state) => match state.handle_event(event)? {
                FileListEvent::Convert(record) => Some(ScreenRequest::Convert(record)),
                FileListEvent::NewDocument => Some(ScreenRequest::NewDocument),
                FileListEvent::Quit => Some(ScreenRequest::Quit),
            },
            Screen::Editor { state, completion } => match state.handle_event(event)? {
                EditorEvent::Save(text) => {
                    completion.resolve(ScreenResult::Confirmed(text));
                    None
                }
                EditorEvent::Cancel => {
                    completion.resolve(ScreenResult::Cancelled);
                    None
                }
                EditorEvent::RequestClear => Some(ScreenRequest::ConfirmClear),
                EditorEvent::ContentChanged => None,
            },
            Screen::NameInput { state, completion } => {
                match state.handle_event(event)? {
                    NameInputEvent::Submit(name) => {
                        completion.resolve(ScreenResult::Confirmed(name));
                    }
                    NameInputEvent::Cancel => {
                        completion.resolve(ScreenResult::Cancelled);
                    }
                    NameInputEvent::ContentChanged => {}
                }
                None
            }
            Screen::Confirm { state, completion } => {
                let ConfirmEvent::Answer(answer) = state.handle_event(event)?;
                completion.resolve(ScreenResult::Confirmed(answer));
                None
            }
            Screen::Message { state, completion } => {
                let MessageEvent::Dismiss = state.handle_event(event)?;
                completion.resolve(ScreenResult::Confirmed(()));
                None
            }
            Screen::Loading { .. } => None,
        }
    }

    /// Resolve the screen from outside (a loading indicator whose work is
    /// done). The root list cannot be dismissed.
    pub fn dismiss(&mut self) {
        let resolved = match self {
            Screen::Documents(_) => {
                debug!("Ignoring dismiss of the document list");
                return;
            }
            Screen::Editor { completion, .. } | Screen::NameInput { completion, .. } => {
                completion.resolve(ScreenResult::Cancelled)
            }
            Screen::Confirm { completion, .. } => completion.resolve(ScreenResult::Cancelled),
            Screen::Message { completion, .. } | Screen::Loading { completion, .. } => {
                completion.resolve(ScreenResult::Confirmed(()))
            }
        };
        if !resolved {
            debug!("Dismissed a screen that was already resolving");
        }
    }
}

impl StackScreen for Screen {
    fn is_resolving(&self) -> bool {
        match self {
            Screen::Documents(_) => false,
            Screen::Editor { completion, .. } | Screen::NameInput { completion, .. } => {
                completion.is_resolving()
            }
            Screen::Confirm { completion, .. } => completion.is_resolving(),
            Screen::Message { completion, .. } | Screen::Loading { completion, .. } => {
                completion.is_resolving()
            }
        }
    }

    fn dispose(self) {
        match self {
            Screen::Documents(_) => {}
            Screen::Editor { completion, .. } | Screen::NameInput { completion, .. } => {
                completion.dispose()
            }
            Screen::Confirm { completion, .. } => completion.dispose(),
            Screen::Message { completion, .. } | Screen::Loading { completion, .. } => {
                completion.dispose()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen_stack::{completion, ScreenId, ScreenStack};
    use std::path::PathBuf;

    fn editor_screen(content: &str) -> (Screen, crate::core::screen_stack::Pending<String>) {
        let (completion, pending) = completion();
        let state = EditorState::new(PathBuf::from("documents/a.txt"), content.to_string());
        (Screen::Editor { state, completion }, pending)
    }

    #[tokio::test]
    async fn test_editor_save_resolves_with_buffer() {
        let mut stack = ScreenStack::new();
        stack.push(ScreenId::ROOT, Screen::Documents(FileListState::new()));
        let (screen, pending) = editor_screen("hello");
        stack.push(ScreenId(1), screen);

        let request = stack.top_mut().unwrap().handle_event(&TuiEvent::Save);
        assert_eq!(request, None);
        assert_eq!(stack.collect_resolved(), vec![ScreenId(1)]);
        assert_eq!(pending.wait().await, ScreenResult::Confirmed("hello".into()));
        assert_eq!(stack.len(), 1);
    }

    #[tokio::test]
    async fn test_editor_cancel_resolves_cancelled() {
        let (mut screen, pending) = editor_screen("hello");
        screen.handle_event(&TuiEvent::Escape);
        assert!(screen.is_resolving());
        screen.dispose();
        assert_eq!(pending.wait().await, ScreenResult::Cancelled);
    }

    #[test]
    fn test_editor_clear_is_a_request() {
        let (mut screen, _pending) = editor_screen("hello");
        assert_eq!(
            screen.handle_event(&TuiEvent::Clear),
            Some(ScreenRequest::ConfirmClear)
        );
        assert!(!screen.is_resolving());
    }

    #[tokio::test]
    async fn test_editor_cannot_resolve_while_clear_pending() {
        let (mut screen, pending) = editor_screen("body");
        screen.handle_event(&TuiEvent::Clear);
        assert_eq!(screen.handle_event(&TuiEvent::InputChar('X')), None);
        assert_eq!(screen.handle_event(&TuiEvent::Save), None);
        assert_eq!(screen.handle_event(&TuiEvent::Escape), None);
        assert!(!screen.is_resolving());

        let Screen::Editor { state, .. } = &mut screen else {
            panic!("editor expected");
        };
        state.finish_clear(false);
        screen.handle_event(&TuiEvent::Save);
        assert!(screen.is_resolving());
        screen.dispose();
        assert_eq!(pending.wait().await, ScreenResult::Confirmed("body".into()));
    }

    #[test]
    fn test_resolving_screen_ignores_input() {
        let (mut screen, _pending) = editor_screen("hello");
        screen.handle_event(&TuiEvent::Escape);
        assert_eq!(screen.handle_event(&TuiEvent::Clear), None);
    }

    #[tokio::test]
    async fn test_confirm_answers() {
        let (completion, pending) = completion();
        let mut screen = Screen::Confirm {
            state: ConfirmState::new("Clear Document", "Sure?"),
            completion,
        };
        screen.handle_event(&TuiEvent::InputChar('y'));
        screen.dispose();
        assert_eq!(pending.wait().await, ScreenResult::Confirmed(true));
    }

    #[tokio::test]
    async fn test_name_input_blank_does_not_resolve() {
        let (completion, pending) = completion();
        let mut screen = Screen::NameInput {
            state: NameInputState::new(),
            completion,
        };
        screen.handle_event(&TuiEvent::Submit);
        assert!(!screen.is_resolving());

        screen.handle_event(&TuiEvent::InputChar('X'));
        screen.handle_event(&TuiEvent::Submit);
        assert!(screen.is_resolving());
        screen.dispose();
        assert_eq!(pending.wait().await, ScreenResult::Confirmed("X".into()));
    }

    #[test]
    fn test_loading_ignores_input_until_dismissed() {
        let (completion, _pending) = completion();
        let mut screen = Screen::Loading {
            state: LoadingState::new("Converting..."),
            completion,
        };
        assert_eq!(screen.handle_event(&TuiEvent::Escape), None);
        assert!(!screen.is_resolving());
        screen.dismiss();
        assert!(screen.is_resolving());
    }

    #[test]
    fn test_document_list_requests() {
        let mut screen = Screen::Documents(FileListState::new());
        assert_eq!(
            screen.handle_event(&TuiEvent::InputChar('n')),
            Some(ScreenRequest::NewDocument)
        );
        assert_eq!(
            screen.handle_event(&TuiEvent::InputChar('q')),
            Some(ScreenRequest::Quit)
        );
        screen.dismiss();
        assert!(!screen.is_resolving());
    }
}
