//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal and the [`ScreenStack`],
//! renders it, and routes keyboard events to the top screen.
//!
//! Document flows (`core::navigation::Controller`) run as tokio tasks and
//! reach the stack only through the [`Navigator`], which sends
//! [`StackCommand`]s over a channel drained once per loop iteration. The loop
//! is the stack's only owner, so no locking is involved.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a loading dialog is up): draws every ~80ms for the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on input, stack commands,
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
pub mod components;
pub mod event;
pub mod navigator;
pub mod screen;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::config::AppConfig;
use crate::core::conversion::{ConversionRunner, SystemOpener};
use crate::core::documents::{DocumentRecord, DocumentStore};
use crate::core::navigation::{Controller, confirm_clear};
use crate::core::screen_stack::{ScreenId, ScreenStack};
use crate::tui::components::FileListState;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::navigator::{Navigator, StackCommand};
use crate::tui::screen::{Screen, ScreenRequest};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

pub fn run(config: AppConfig) -> std::io::Result<()> {
    let store = DocumentStore::from_config(&config);
    let runner = ConversionRunner::from_config(&config, Arc::new(SystemOpener));
    info!(
        "Documents in {}, converting with {} (timeout {:?})",
        store.layout().output_dir().display(),
        config.conversion_script.display(),
        runner.timeout()
    );

    // Channel for stack commands from background tasks
    let (tx, rx) = mpsc::channel();
    let navigator = Navigator::new(tx.clone());
    let controller = Arc::new(Controller::new(
        Arc::new(navigator.clone()),
        store.clone(),
        runner,
    ));

    let mut stack = ScreenStack::new();
    stack.push(ScreenId::ROOT, Screen::Documents(FileListState::new()));
    spawn_listing(store.clone(), tx.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Could not enable terminal modes: {}", e));

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = stack
            .iter()
            .any(|(_, screen)| matches!(screen, Screen::Loading { .. }));
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &mut stack, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout)?;

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(|| poll_event_immediate().ok().flatten()))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits, whatever is on top
            if matches!(event, TuiEvent::ForceQuit) {
                info!("Force quit");
                should_quit = true;
                break;
            }

            let Some(top_id) = stack.top_id() else {
                break;
            };
            let request = stack.top_mut().and_then(|screen| screen.handle_event(&event));
            match request {
                Some(ScreenRequest::Quit) => {
                    should_quit = true;
                    break;
                }
                Some(ScreenRequest::NewDocument) => spawn_new_document(controller.clone()),
                Some(ScreenRequest::Convert(record)) => spawn_convert(controller.clone(), record),
                Some(ScreenRequest::ConfirmClear) => {
                    spawn_confirm_clear(navigator.clone(), top_id)
                }
                None => {}
            }

            // A resolved screen must be gone before the next key reaches the top
            stack.collect_resolved();
        }

        if should_quit {
            break;
        }

        // Apply stack commands from the flow tasks
        while let Ok(command) = rx.try_recv() {
            needs_redraw = true;
            apply_command(&mut stack, command, &store, &tx);
        }
        stack.collect_resolved();
    }

    ratatui::restore();
    info!("Exited with {} screen(s) on the stack", stack.len());
    Ok(())
}

fn apply_command(
    stack: &mut ScreenStack<Screen>,
    command: StackCommand,
    store: &DocumentStore,
    tx: &mpsc::Sender<StackCommand>,
) {
    match command {
        StackCommand::Push(id, screen) => stack.push(id, screen),
        StackCommand::Dismiss(id) => match stack.get_mut(id) {
            Some(screen) => screen.dismiss(),
            None => debug!("Dismiss for unknown screen {}", id),
        },
        StackCommand::FinishClear { editor, confirmed } => match stack.get_mut(editor) {
            Some(Screen::Editor { state, .. }) => {
                info!(
                    "Clear of {} {}",
                    state.path().display(),
                    if confirmed { "confirmed" } else { "declined" }
                );
                state.finish_clear(confirmed);
            }
            _ => debug!("Editor {} closed before the clear was answered", editor),
        },
        StackCommand::RefreshListing => spawn_listing(store.clone(), tx.clone()),
        StackCommand::Listing(listing) => {
            if let Some(Screen::Documents(list)) = stack.get_mut(ScreenId::ROOT) {
                list.set_documents(listing);
            }
        }
    }
}

/// Read the document directory off the event loop thread and deliver the
/// result as a `Listing` command.
fn spawn_listing(store: DocumentStore, tx: mpsc::Sender<StackCommand>) {
    tokio::task::spawn_blocking(move || {
        let listing = store.list().map_err(|e| {
            warn!(
                "Failed to list {}: {}",
                store.layout().output_dir().display(),
                e
            );
            e.to_string()
        });
        if tx.send(StackCommand::Listing(listing)).is_err() {
            debug!("Listing finished after the event loop exited");
        }
    });
}

fn spawn_new_document(controller: Arc<Controller>) {
    info!("Spawning new document flow");
    tokio::spawn(async move {
        if let Some(outcome) = controller.new_document().await {
            debug!("New document flow finished (success={})", outcome.succeeded());
        }
    });
}

fn spawn_convert(controller: Arc<Controller>, record: DocumentRecord) {
    info!("Spawning conversion of {}", record.path.display());
    tokio::spawn(async move {
        let outcome = controller.convert_existing(&record).await;
        debug!("Conversion of {} finished (success={})", record.name, outcome.succeeded());
    });
}

fn spawn_confirm_clear(navigator: Navigator, editor: ScreenId) {
    tokio::spawn(async move {
        let confirmed = confirm_clear(&navigator).await;
        navigator.finish_clear(editor, confirmed);
    });
}
