//! Informational dialog with a single Continue button.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::dialog::{button_row, dialog_block, dialog_rect, wrapped_height, DIALOG_WIDTH};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEvent {
    Dismiss,
}

#[derive(Debug)]
pub struct MessageState {
    pub title: String,
    pub message: String,
}

impl MessageState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl EventHandler for MessageState {
    type Event = MessageEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MessageEvent> {
        match event {
            TuiEvent::Submit | TuiEvent::Escape | TuiEvent::InputChar(' ') => {
                Some(MessageEvent::Dismiss)
            }
            _ => None,
        }
    }
}

pub struct Message<'a> {
    state: &'a MessageState,
}

impl<'a> Message<'a> {
    pub fn new(state: &'a MessageState) -> Self {
        Self { state }
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let body_rows = wrapped_height(&self.state.message, DIALOG_WIDTH.min(area.width));
        let rect = dialog_rect(body_rows + 2, area);
        frame.render_widget(Clear, rect);

        let block = dialog_block(&self.state.title);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        use Constraint::{Length, Min};
        let [message_area, button_area] = Layout::vertical([Min(0), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.state.message.as_str()).wrap(Wrap { trim: false }),
            message_area,
        );
        frame.render_widget(Paragraph::new(button_row(&["Continue"], Some(0))), button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_dismiss_keys() {
        let mut state = MessageState::new("✓ SUCCESS", "done");
        for event in [TuiEvent::Submit, TuiEvent::Escape, TuiEvent::InputChar(' ')] {
            assert_eq!(state.handle_event(&event), Some(MessageEvent::Dismiss));
        }
        assert_eq!(state.handle_event(&TuiEvent::InputChar('q')), None);
    }

    #[test]
    fn test_render_multiline_message() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = MessageState::new(
            "✓ SUCCESS",
            "File saved: Acme_Cover_Letter.txt\nPDF created: Acme_Cover_Letter.pdf\n\nPDF opened automatically.",
        );

        terminal
            .draw(|f| Message::new(&state).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("SUCCESS"));
        assert!(text.contains("PDF created: Acme_Cover_Letter.pdf"));
        assert!(text.contains("PDF opened automatically."));
        assert!(text.contains("Continue"));
    }
}
