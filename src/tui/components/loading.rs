//! "Please Wait" dialog shown while a conversion runs. It takes no input and
//! is dismissed by whoever pushed it.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::dialog::{dialog_block, dialog_rect, wrapped_height, DIALOG_WIDTH};
use crate::tui::component::Component;

const TITLE: &str = "Please Wait";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug)]
pub struct LoadingState {
    pub message: String,
}

impl LoadingState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// # Props
///
/// - `spinner_frame`: animation tick from the event loop
pub struct Loading<'a> {
    state: &'a LoadingState,
    spinner_frame: usize,
}

impl<'a> Loading<'a> {
    pub fn new(state: &'a LoadingState, spinner_frame: usize) -> Self {
        Self {
            state,
            spinner_frame,
        }
    }
}

impl Component for Loading<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let body_rows = wrapped_height(&self.state.message, DIALOG_WIDTH.min(area.width));
        let rect = dialog_rect(body_rows + 2, area);
        frame.render_widget(Clear, rect);

        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let mut lines = vec![
            Line::from(Span::styled(spinner, Style::default().fg(Color::Yellow))).centered(),
            Line::default(),
        ];
        lines.extend(self.state.message.lines().map(|l| Line::from(l.to_string())));

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(dialog_block(TITLE));
        frame.render_widget(body, rect);
    }
}
