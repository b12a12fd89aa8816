//! Layout helpers shared by the modal dialogs (name input, confirm, message,
//! loading): a centered box of fixed width whose height follows its text.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding};

/// Preferred dialog width in columns (shrinks on narrow terminals).
pub const DIALOG_WIDTH: u16 = 60;

/// Borders plus vertical padding around the dialog body.
const VERTICAL_OVERHEAD: u16 = 4;

/// Borders plus horizontal padding.
const HORIZONTAL_OVERHEAD: u16 = 6;

/// Rows the dialog body needs for `text` at the given outer width.
pub fn wrapped_height(text: &str, outer_width: u16) -> u16 {
    let width = outer_width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
    text.split('\n')
        .map(|line| u16::try_from(textwrap::wrap(line, width).len().max(1)).unwrap_or(u16::MAX))
        .fold(0u16, u16::saturating_add)
}

/// A box `DIALOG_WIDTH` wide (clamped) and tall enough for `body_rows`,
/// centered in `outer`.
pub fn dialog_rect(body_rows: u16, outer: Rect) -> Rect {
    let width = DIALOG_WIDTH.min(outer.width);
    let height = body_rows.saturating_add(VERTICAL_OVERHEAD).min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

/// Bordered block with a bold title bar.
pub fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )))
        .title_alignment(Alignment::Center)
        .padding(Padding::new(2, 2, 1, 1))
}

/// `[ Yes (Y) ]  [ No (N) ]` with the focused button reversed.
pub fn button_row(labels: &[&str], focused: Option<usize>) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if focused == Some(i) {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
    }
    Line::from(spans).centered()
}
