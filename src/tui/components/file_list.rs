//! # Document List Component
//!
//! The root screen: every `*.txt` document, newest first. Enter converts the
//! selected document, `n` starts a new one, `q` quits.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FileListState` lives on the screen stack
//! - `FileList` is created each frame with borrowed state
//!
//! Rows map to documents by index into `FileListState::documents`; the list
//! widget itself carries no document data.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};
use ratatui::Frame;

use crate::core::documents::DocumentRecord;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Width of the file name column.
const NAME_COLUMN: usize = 45;

const EMPTY_PLACEHOLDER: &str = "No .txt files found. Press 'n' to create a new document.";

/// Persistent state for the document list.
pub struct FileListState {
    pub documents: Vec<DocumentRecord>,
    pub selected: usize,
    pub list_state: ListState,
    /// Set when the last listing failed.
    pub error: Option<String>,
    /// False until the first listing arrives.
    pub loaded: bool,
}

/// Events emitted by the document list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileListEvent {
    Convert(DocumentRecord),
    NewDocument,
    Quit,
}

impl FileListState {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            error: None,
            loaded: false,
        }
    }

    /// Replace the listing, keeping the selection on the same file when it
    /// is still present.
    pub fn set_documents(&mut self, listing: Result<Vec<DocumentRecord>, String>) {
        self.loaded = true;
        let documents = match listing {
            Ok(documents) => {
                self.error = None;
                documents
            }
            Err(e) => {
                self.error = Some(e);
                Vec::new()
            }
        };

        let previous = self.selected_document().map(|d| d.path.clone());
        self.documents = documents;
        self.selected = previous
            .and_then(|path| self.documents.iter().position(|d| d.path == path))
            .unwrap_or(0);

        if self.documents.is_empty() {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(self.documents.len() - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn selected_document(&self) -> Option<&DocumentRecord> {
        self.documents.get(self.selected)
    }

    fn select(&mut self, index: usize) {
        if self.documents.is_empty() {
            return;
        }
        self.selected = index.min(self.documents.len() - 1);
        self.list_state.select(Some(self.selected));
    }
}

impl Default for FileListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for FileListState {
    type Event = FileListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FileListEvent> {
        match event {
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::CursorHome => {
                self.select(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.select(self.documents.len().saturating_sub(1));
                None
            }
            TuiEvent::Submit => self.selected_document().cloned().map(FileListEvent::Convert),
            TuiEvent::InputChar('n') | TuiEvent::InputChar('N') => Some(FileListEvent::NewDocument),
            TuiEvent::InputChar('q') | TuiEvent::InputChar('Q') => Some(FileListEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the document list.
pub struct FileList<'a> {
    state: &'a mut FileListState,
}

impl<'a> FileList<'a> {
    pub fn new(state: &'a mut FileListState) -> Self {
        Self { state }
    }
}

impl Component for FileList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [title_area, list_area] = Layout::vertical([Length(1), Min(0)]).areas(area);

        let title = Paragraph::new("PDF Converter  ·  Text Files (sorted by last modified)")
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(" Enter Convert  n New  j/k Move  q Quit ").centered())
            .padding(Padding::horizontal(1));

        if let Some(error) = &self.state.error {
            let message = Paragraph::new(format!("Could not list documents: {error}"))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, list_area);
            return;
        }

        if self.state.documents.is_empty() {
            let text = if self.state.loaded { EMPTY_PLACEHOLDER } else { "Loading documents..." };
            let empty = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, list_area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let name = format!("{:<width$}", doc.name, width = NAME_COLUMN);
                ListItem::new(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(" ", style),
                    Span::styled(doc.modified_label(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn doc(name: &str) -> DocumentRecord {
        DocumentRecord {
            name: name.to_string(),
            path: PathBuf::from(format!("documents/{name}")),
            modified_at: SystemTime::now(),
        }
    }

    fn rendered(state: &mut FileListState) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| FileList::new(state).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = FileListState::new();
        state.set_documents(Ok(vec![doc("a.txt"), doc("b.txt")]));

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::InputChar('j'));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn test_submit_emits_selected_record() {
        let mut state = FileListState::new();
        state.set_documents(Ok(vec![doc("a.txt"), doc("b.txt")]));
        state.handle_event(&TuiEvent::CursorDown);

        let expected = state.documents[1].clone();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(FileListEvent::Convert(expected))
        );
    }

    #[test]
    fn test_submit_on_empty_list_does_nothing() {
        let mut state = FileListState::new();
        state.set_documents(Ok(Vec::new()));
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_commands() {
        let mut state = FileListState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n')),
            Some(FileListEvent::NewDocument)
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('q')), Some(FileListEvent::Quit));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_refresh_keeps_selection_by_path() {
        let mut state = FileListState::new();
        state.set_documents(Ok(vec![doc("a.txt"), doc("b.txt"), doc("c.txt")]));
        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.selected_document().unwrap().name, "c.txt");

        // A new document appears at the top
        state.set_documents(Ok(vec![doc("new.txt"), doc("a.txt"), doc("b.txt"), doc("c.txt")]));
        assert_eq!(state.selected_document().unwrap().name, "c.txt");

        // The selected document disappears
        state.set_documents(Ok(vec![doc("new.txt")]));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_render_placeholder_when_empty() {
        let mut state = FileListState::new();
        state.set_documents(Ok(Vec::new()));
        assert!(rendered(&mut state).contains("No .txt files found"));
    }

    #[test]
    fn test_render_rows() {
        let mut state = FileListState::new();
        state.set_documents(Ok(vec![doc("Acme_Cover_Letter.txt")]));
        let text = rendered(&mut state);
        assert!(text.contains("Acme_Cover_Letter.txt"));
        assert!(text.contains("Text Files (sorted by last modified)"));
    }

    #[test]
    fn test_render_listing_error() {
        let mut state = FileListState::new();
        state.set_documents(Err("permission denied".into()));
        assert!(rendered(&mut state).contains("permission denied"));
    }
}
