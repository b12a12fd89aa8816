//! Yes/No confirmation dialog.
//!
//! `y` answers yes, `n` or Esc answer no. Tab and ←/→ move focus between the
//! buttons; Enter activates the focused one. Focus starts on No so a stray
//! Enter never confirms a destructive action.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::dialog::{button_row, dialog_block, dialog_rect, wrapped_height, DIALOG_WIDTH};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const YES: usize = 0;
const NO: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    Answer(bool),
}

#[derive(Debug)]
pub struct ConfirmState {
    pub title: String,
    pub message: String,
    /// Index of the focused button (`YES` or `NO`)
    focused: usize,
}

impl ConfirmState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            focused: NO,
        }
    }

    pub fn yes_focused(&self) -> bool {
        self.focused == YES
    }
}

impl EventHandler for ConfirmState {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::InputChar('y') | TuiEvent::InputChar('Y') => Some(ConfirmEvent::Answer(true)),
            TuiEvent::InputChar('n') | TuiEvent::InputChar('N') | TuiEvent::Escape => {
                Some(ConfirmEvent::Answer(false))
            }
            TuiEvent::Tab | TuiEvent::CursorLeft | TuiEvent::CursorRight => {
                self.focused = if self.focused == YES { NO } else { YES };
                None
            }
            TuiEvent::Submit => Some(ConfirmEvent::Answer(self.yes_focused())),
            _ => None,
        }
    }
}

pub struct Confirm<'a> {
    state: &'a ConfirmState,
}

impl<'a> Confirm<'a> {
    pub fn new(state: &'a ConfirmState) -> Self {
        Self { state }
    }
}

impl Component for Confirm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let body_rows = wrapped_height(&self.state.message, DIALOG_WIDTH.min(area.width));
        let rect = dialog_rect(body_rows + 2, area);
        frame.render_widget(Clear, rect);

        let block = dialog_block(&self.state.title);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        use Constraint::{Length, Min};
        let [message_area, buttons_area] = Layout::vertical([Min(0), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.state.message.as_str()).wrap(Wrap { trim: false }),
            message_area,
        );
        frame.render_widget(
            Paragraph::new(button_row(&["Yes (Y)", "No (N)"], Some(self.state.focused))),
            buttons_area,
        );
    }
}
