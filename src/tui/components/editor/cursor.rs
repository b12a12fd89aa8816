//! Cursor position tracking and navigation for the editor.
//!
//! `CursorState` owns the cursor byte offset and the scroll offsets. All
//! navigation methods accept `buffer: &str` explicitly: the text data is owned
//! by `EditorState`, keeping the dependency visible.
//!
//! Columns are display columns (`unicode-width`), so wide characters keep the
//! terminal cursor aligned with the text.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Byte offset of the char boundary before `pos`.
pub(crate) fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

/// Byte offset of the char boundary after `pos`.
pub(crate) fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map(|c| pos + c.len_utf8()).unwrap_or(s.len())
}

/// Byte offset where the line containing `pos` starts.
pub(super) fn line_start(s: &str, pos: usize) -> usize {
    s[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte offset where the line containing `pos` ends (before its `\n`).
pub(super) fn line_end(s: &str, pos: usize) -> usize {
    s[pos..].find('\n').map(|i| pos + i).unwrap_or(s.len())
}

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible line
    pub scroll_row: u16,
    /// First visible display column
    pub scroll_col: u16,
    /// Visible rows from the last render (used for page movement)
    pub last_height: u16,
}

impl CursorState {
    const DEFAULT_HEIGHT: u16 = 20;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_row: 0,
            scroll_col: 0,
            last_height: Self::DEFAULT_HEIGHT,
        }
    }

    /// Reset cursor to start (used after the buffer is cleared).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    /// Line index and display column of the cursor.
    pub fn line_col(&self, buffer: &str) -> (usize, usize) {
        let start = line_start(buffer, self.pos);
        let line = buffer[..start].matches('\n').count();
        let col = buffer[start..self.pos].width();
        (line, col)
    }

    /// Move `lines` up (negative) or down (positive), keeping the display
    /// column where the target line is long enough.
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_vertically(&mut self, buffer: &str, lines: isize) -> bool {
        let (current_line, col) = self.line_col(buffer);
        let last_line = buffer.matches('\n').count();
        let target = (current_line as isize + lines).clamp(0, last_line as isize) as usize;
        if target == current_line {
            return false;
        }

        let start = buffer
            .split_inclusive('\n')
            .take(target)
            .map(str::len)
            .sum::<usize>();
        let end = line_end(buffer, start);

        let mut pos = start;
        let mut width = 0;
        for (i, c) in buffer[start..end].char_indices() {
            let w = c.width().unwrap_or(0);
            if width + w > col {
                break;
            }
            width += w;
            pos = start + i + c.len_utf8();
        }
        self.pos = pos;
        true
    }

    /// Adjust scroll offsets so the cursor is inside a viewport of the given
    /// size.
    pub fn follow(&mut self, buffer: &str, width: u16, height: u16) {
        self.last_height = height.max(1);
        let (line, col) = self.line_col(buffer);
        let (line, col) = (line as u16, col as u16);

        if line < self.scroll_row {
            self.scroll_row = line;
        } else if height > 0 && line >= self.scroll_row + height {
            self.scroll_row = line + 1 - height;
        }

        if col < self.scroll_col {
            self.scroll_col = col;
        } else if width > 0 && col >= self.scroll_col + width {
            self.scroll_col = col + 1 - width;
        }
    }

    /// Terminal position of the cursor inside `inner` (the area text is drawn in).
    pub fn screen_pos(&self, buffer: &str, inner: Rect) -> (u16, u16) {
        let (line, col) = self.line_col(buffer);
        let x = (col as u16).saturating_sub(self.scroll_col);
        let y = (line as u16).saturating_sub(self.scroll_row);
        (
            inner.x + x.min(inner.width.saturating_sub(1)),
            inner.y + y.min(inner.height.saturating_sub(1)),
        )
    }
}
