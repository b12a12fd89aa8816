//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Every screen on the stack is backed by one component here. Components
//! follow the persistent state + transient wrapper pattern:
//!
//! - `*State` structs live inside the screen stack entry and implement
//!   `EventHandler`, turning `TuiEvent`s into a small component event enum
//! - Render wrappers (`FileList`, `Editor`, `NameInput`, ...) are built each
//!   frame with borrowed state and implement `Component`
//!
//! Components never talk to the filesystem or the stack; they only emit
//! events. `tui::screen` maps those events onto screen results.
//!
//! ### Full Screens
//!
//! - `FileList`: the document listing (root screen)
//! - `Editor`: multi-line document editor
//!
//! ### Dialogs
//!
//! Drawn centered over whatever lies beneath them, sized by `dialog`:
//! - `NameInput`: asks for a new document's name
//! - `Confirm`: Yes/No question
//! - `Message`: result or error text with a Continue button
//! - `Loading`: spinner shown while a conversion runs
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── dialog.rs        (shared dialog layout)
//! ├── file_list.rs
//! ├── editor/
//! │   ├── mod.rs
//! │   └── cursor.rs    (cursor and scroll tracking)
//! ├── name_input.rs
//! ├── confirm.rs
//! ├── message.rs
//! └── loading.rs
//! ```

pub mod confirm;
pub mod dialog;
pub mod editor;
pub mod file_list;
pub mod loading;
pub mod message;
pub mod name_input;

pub use confirm::{Confirm, ConfirmEvent, ConfirmState};
pub use editor::{Editor, EditorEvent, EditorState};
pub use file_list::{FileList, FileListEvent, FileListState};
pub use loading::{Loading, LoadingState};
pub use message::{Message, MessageEvent, MessageState};
pub use name_input::{NameInput, NameInputEvent, NameInputState};
