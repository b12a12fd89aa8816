//! # Editor Component
//!
//! Full-screen multi-line editor for one document.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and cursor movement
//! - Emit `Save` with the buffer on Ctrl+S
//! - Emit `RequestClear` on Ctrl+L, then ignore all input until the answer
//!   arrives through `finish_clear()` (the buffer is only emptied on yes)
//! - Emit `Cancel` on Esc
//!
//! ## State Management
//!
//! The buffer is internal state seeded from the file's content. Cursor and
//! scroll offsets are encapsulated in `CursorState`.

mod cursor;

use log::debug;
use std::path::{Path, PathBuf};

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{line_end, line_start, CursorState};
pub(crate) use cursor::{next_char_boundary, prev_char_boundary};

/// Spaces inserted for Tab.
const TAB: &str = "    ";

const HELP: &str = " Ctrl+S Save & Convert  Ctrl+L Clear  Esc Cancel ";

/// High-level events emitted by the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Save requested: the current buffer
    Save(String),
    /// Clear requested; needs confirmation first
    RequestClear,
    /// Leave without saving
    Cancel,
    ContentChanged,
}

/// Editor state for one open document.
///
/// # Props
///
/// - `path`: the file being edited (shown in the title)
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: cursor position and scroll offsets (see `CursorState`)
/// - `awaiting_clear`: a clear confirmation is open for this editor
pub struct EditorState {
    pub path: PathBuf,
    pub buffer: String,
    cursor: CursorState,
    awaiting_clear: bool,
}

impl EditorState {
    /// Open the editor with the file's current content, cursor at the start.
    pub fn new(path: PathBuf, content: String) -> Self {
        Self {
            path,
            buffer: content,
            cursor: CursorState::new(),
            awaiting_clear: false,
        }
    }

    /// Empty the buffer (after a confirmed clear).
    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Apply the answer to a pending clear and accept input again.
    pub fn finish_clear(&mut self, confirmed: bool) {
        if !self.awaiting_clear {
            debug!("Clear answer for {} without a pending request", self.path.display());
        }
        self.awaiting_clear = false;
        if confirmed {
            self.clear();
        }
    }

    pub fn is_awaiting_clear(&self) -> bool {
        self.awaiting_clear
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cursor byte offset into `buffer`.
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    fn insert_str(&mut self, text: &str) -> Option<EditorEvent> {
        if text.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
        Some(EditorEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<EditorEvent> {
        (self.cursor.pos != pos).then(|| {
            self.cursor.pos = pos;
            EditorEvent::ContentChanged
        })
    }

    fn title(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        format!(" Editing: {name} ")
    }
}

/// Pasted text with Windows line endings and tabs normalized.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', TAB)
}

impl EventHandler for EditorState {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // Suspended until the clear confirmation is answered
        if self.awaiting_clear {
            return None;
        }

        match event {
            TuiEvent::Save => Some(EditorEvent::Save(self.buffer.clone())),
            TuiEvent::Clear => {
                self.awaiting_clear = true;
                Some(EditorEvent::RequestClear)
            }
            TuiEvent::Escape => Some(EditorEvent::Cancel),
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp))
            }
            TuiEvent::Submit => self.insert_str("\n"),
            TuiEvent::Tab => self.insert_str(TAB),
            TuiEvent::Paste(text) => self.insert_str(&normalize_paste(text)),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(EditorEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(EditorEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                let pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorRight => {
                let pos = next_char_boundary(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorHome => {
                let pos = line_start(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorEnd => {
                let pos = line_end(&self.buffer, self.cursor.pos);
                self.move_to(pos)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(EditorEvent::ContentChanged),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(EditorEvent::ContentChanged),
            TuiEvent::PageUp => {
                let page = self.cursor.last_height as isize;
                self.cursor
                    .move_vertically(&self.buffer, -page)
                    .then_some(EditorEvent::ContentChanged)
            }
            TuiEvent::PageDown => {
                let page = self.cursor.last_height as isize;
                self.cursor
                    .move_vertically(&self.buffer, page)
                    .then_some(EditorEvent::ContentChanged)
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the editor.
pub struct Editor<'a> {
    state: &'a mut EditorState,
    /// Whether the terminal cursor should be placed (false while a dialog is on top).
    focused: bool,
}

impl<'a> Editor<'a> {
    pub fn new(state: &'a mut EditorState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Component for Editor<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self.state.title();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(HELP).centered());

        let inner = block.inner(area);
        self.state
            .cursor
            .follow(&self.state.buffer, inner.width, inner.height);

        let text = Paragraph::new(self.state.buffer.as_str())
            .block(block)
            .scroll((self.state.cursor.scroll_row, self.state.cursor.scroll_col));
        frame.render_widget(text, area);

        if self.focused && !self.state.awaiting_clear && inner.width > 0 && inner.height > 0 {
            let position = self.state.cursor.screen_pos(&self.state.buffer, inner);
            frame.set_cursor_position(position);
        }
    }
}
