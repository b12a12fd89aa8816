use crate::core::screen_stack::ScreenStack;
use crate::tui::component::Component;
use crate::tui::components::{Confirm, Editor, FileList, Loading, Message, NameInput};
use crate::tui::screen::Screen;

use ratatui::Frame;
use ratatui::layout::Rect;

/// Draw the visible part of the stack: the topmost full screen, then every
/// dialog above it in push order. Frozen screens are drawn but never get the
/// terminal cursor.
pub fn draw_ui(frame: &mut Frame, stack: &mut ScreenStack<Screen>, spinner_frame: usize) {
    let area = frame.area();
    let start = stack
        .iter()
        .enumerate()
        .filter(|(_, (_, screen))| screen.is_full_screen())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    let top = stack.len().saturating_sub(1);

    for (i, (_, screen)) in stack.iter_mut().enumerate().skip(start) {
        draw_screen(frame, area, screen, i == top, spinner_frame);
    }
}

fn draw_screen(frame: &mut Frame, area: Rect, screen: &mut Screen, focused: bool, spinner_frame: usize) {
    match screen {
        Screen::Documents(state) => FileList::new(state).render(frame, area),
        Screen::Editor { state, .. } => Editor::new(state, focused).render(frame, area),
        Screen::NameInput { state, .. } => NameInput::new(state).render(frame, area),
        Screen::Confirm { state, .. } => Confirm::new(state).render(frame, area),
        Screen::Message { state, .. } => Message::new(state).render(frame, area),
        Screen::Loading { state, .. } => Loading::new(state, spinner_frame).render(frame, area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen_stack::{completion, ScreenId};
    use crate::tui::components::{EditorState, FileListState, MessageState};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn rendered(stack: &mut ScreenStack<Screen>) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, stack, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_dialog_drawn_over_editor_not_list() {
        let mut stack = ScreenStack::new();
        let mut list = FileListState::new();
        list.set_documents(Ok(Vec::new()));
        stack.push(ScreenId::ROOT, Screen::Documents(list));

        let (completion_a, _pending_a) = completion();
        stack.push(
            ScreenId(1),
            Screen::Editor {
                state: EditorState::new(PathBuf::from("documents/a.txt"), "body text".into()),
                completion: completion_a,
            },
        );
        let (completion_b, _pending_b) = completion();
        stack.push(
            ScreenId(2),
            Screen::Message {
                state: MessageState::new("✗ ERROR", "Something failed"),
                completion: completion_b,
            },
        );

        let text = rendered(&mut stack);
        assert!(text.contains("Editing: a.txt"));
        assert!(text.contains("Something failed"));
        assert!(!text.contains("No .txt files found"));
    }

    #[test]
    fn test_root_only() {
        let mut stack = ScreenStack::new();
        stack.push(ScreenId::ROOT, Screen::Documents(FileListState::new()));
        assert!(rendered(&mut stack).contains("Loading documents..."));
    }
}
