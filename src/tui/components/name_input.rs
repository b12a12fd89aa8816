//! Single-line modal asking for a new document's name.
//!
//! Enter submits the trimmed name; a blank name is ignored and the dialog
//! stays open. Esc cancels.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::dialog::{button_row, dialog_block, dialog_rect, wrapped_height, DIALOG_WIDTH};
use super::editor::{next_char_boundary, prev_char_boundary};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const TITLE: &str = "Enter Document Name";
const PROMPT: &str = "Enter the name for your document (e.g., 'SpaceX', 'Google', etc.)";
const PLACEHOLDER: &str = "Name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInputEvent {
    /// Trimmed, non-empty name without path separators
    Submit(String),
    Cancel,
    ContentChanged,
}

/// A name that stays inside the document directory once put into a template.
fn is_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[derive(Debug, Default)]
pub struct NameInputState {
    pub buffer: String,
    /// Cursor byte offset into `buffer`
    cursor: usize,
}

impl NameInputState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for NameInputState {
    type Event = NameInputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<NameInputEvent> {
        match event {
            TuiEvent::Submit => {
                let name = self.buffer.trim();
                is_file_name(name).then(|| NameInputEvent::Submit(name.to_string()))
            }
            TuiEvent::Escape => Some(NameInputEvent::Cancel),
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Names are single-line
                let line = text.lines().next().unwrap_or_default();
                self.buffer.insert_str(self.cursor, line);
                self.cursor += line.len();
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(NameInputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

pub struct NameInput<'a> {
    state: &'a NameInputState,
}

impl<'a> NameInput<'a> {
    pub fn new(state: &'a NameInputState) -> Self {
        Self { state }
    }
}

impl Component for NameInput<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prompt_rows = wrapped_height(PROMPT, DIALOG_WIDTH.min(area.width));
        // prompt, blank, input (3 with borders), blank, buttons
        let rect = dialog_rect(prompt_rows + 6, area);
        frame.render_widget(Clear, rect);

        let block = dialog_block(TITLE);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        use Constraint::{Length, Min};
        let [prompt_area, _, input_area, _, buttons_area] =
            Layout::vertical([Length(prompt_rows), Length(1), Length(3), Min(0), Length(1)])
                .areas(inner);

        frame.render_widget(
            Paragraph::new(PROMPT).wrap(Wrap { trim: false }),
            prompt_area,
        );

        let field = if self.state.buffer.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.state.buffer.as_str())
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let input_inner = input_block.inner(input_area);

        // Keep the cursor visible on long names
        let before_cursor = self.state.buffer[..self.state.cursor].width() as u16;
        let scroll = before_cursor.saturating_sub(input_inner.width.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(field)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .scroll((0, scroll))
                .block(input_block),
            input_area,
        );

        frame.render_widget(
            Paragraph::new(button_row(&["Continue (Enter)", "Cancel (Esc)"], None)),
            buttons_area,
        );

        if input_inner.width > 0 && input_inner.height > 0 {
            frame.set_cursor_position((input_inner.x + before_cursor - scroll, input_inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn typed(text: &str) -> NameInputState {
        let mut state = NameInputState::new();
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
        state
    }

    #[test]
    fn test_submit_trims_name() {
        let mut state = typed("  Acme  ");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(NameInputEvent::Submit("Acme".into()))
        );
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let mut state = typed("   ");
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(NameInputState::new().handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_names_with_path_parts_are_ignored() {
        for name in ["../../tmp/evil", "sub/Acme", "a\\b", "..", "."] {
            let mut state = typed(name);
            assert_eq!(state.handle_event(&TuiEvent::Submit), None, "{name}");
            assert_eq!(state.buffer, name);
        }
        let mut state = typed("Acme..Corp");
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(NameInputEvent::Submit("Acme..Corp".into()))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = typed("Acme");
        assert_eq!(state.handle_event(&TuiEvent::Escape), Some(NameInputEvent::Cancel));
    }

    #[test]
    fn test_editing_keys() {
        let mut state = typed("Acne");
        state.handle_event(&TuiEvent::CursorLeft);
        state.handle_event(&TuiEvent::CursorLeft);
        state.handle_event(&TuiEvent::Backspace);
        state.handle_event(&TuiEvent::InputChar('c'));
        state.handle_event(&TuiEvent::Delete);
        state.handle_event(&TuiEvent::InputChar('m'));
        assert_eq!(state.buffer, "Acme");
    }

    #[test]
    fn test_paste_keeps_first_line() {
        let mut state = NameInputState::new();
        state.handle_event(&TuiEvent::Paste("SpaceX\nignored".into()));
        assert_eq!(state.buffer, "SpaceX");
    }

    #[test]
    fn test_render_shows_prompt_and_placeholder() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = NameInputState::new();

        terminal
            .draw(|f| NameInput::new(&state).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Enter Document Name"));
        assert!(text.contains("Name"));
        assert!(text.contains("Continue"));
    }
}
