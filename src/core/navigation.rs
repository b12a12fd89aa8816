//! # Navigation Controller
//!
//! The document flows, written against the [`Screens`] trait so they never
//! touch the stack or the terminal directly:
//!
//! ```text
//! new document:   name dialog ─▶ open/create file ─▶ editor ─▶ save ─▶ convert ─▶ refresh
//!                      │ cancel                         │ cancel
//!                      ▼                                ▼
//!                  (nothing)                         refresh
//!
//! existing file:  derive name ─▶ convert
//!
//! convert:        loading ─▶ run script ─▶ dismiss loading ─▶ result dialog
//! ```
//!
//! Each flow runs as its own task and suspends at every dialog. Steps within
//! one flow are strictly sequential.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::conversion::{ConversionOutcome, ConversionRunner};
use crate::core::documents::{DocumentRecord, DocumentStore};
use crate::core::screen_stack::{ScreenId, ScreenResult};

pub const SUCCESS_TITLE: &str = "✓ SUCCESS";
pub const FAILURE_TITLE: &str = "✗ CONVERSION FAILED";
pub const ERROR_TITLE: &str = "✗ ERROR";

/// What the flows may ask of the UI. Every `async` method pushes a screen and
/// suspends until that screen is disposed.
#[async_trait]
pub trait Screens: Send + Sync {
    /// Text-input dialog for a document name. Blank names never resolve it.
    async fn prompt_name(&self) -> ScreenResult<String>;

    /// Full-screen editor seeded with `content`. Resolves with the buffer on
    /// save, `Cancelled` on cancel.
    async fn edit_document(&self, path: PathBuf, content: String) -> ScreenResult<String>;

    /// Yes/no dialog.
    async fn confirm(&self, title: String, message: String) -> ScreenResult<bool>;

    /// Non-dismissible loading indicator. Stays up until [`Screens::dismiss`].
    fn show_loading(&self, message: String) -> ScreenId;

    /// Close a screen opened without a result, i.e. a loading indicator.
    fn dismiss(&self, id: ScreenId);

    /// Message dialog; returns once the user dismisses it.
    async fn show_message(&self, title: String, message: String);

    /// Re-read the document list in the background.
    fn refresh_listing(&self);
}

/// Ask before clearing the editor. Only an explicit "yes" clears.
pub async fn confirm_clear(screens: &dyn Screens) -> bool {
    let answer = screens
        .confirm(
            "Clear Document".to_string(),
            "Are you sure you want to clear all text?\nThis cannot be undone.".to_string(),
        )
        .await;
    matches!(answer, ScreenResult::Confirmed(true))
}

/// Title and body of the dialog that reports a conversion.
pub fn result_message(outcome: &ConversionOutcome) -> (String, String) {
    let text_name = file_name(&outcome.text_path);
    match outcome.error_message() {
        None => (
            SUCCESS_TITLE.to_string(),
            format!(
                "File saved: {}\nPDF created: {}\n\nPDF opened automatically.",
                text_name,
                file_name(&outcome.pdf_path)
            ),
        ),
        Some(error) => (
            FAILURE_TITLE.to_string(),
            format!("File saved: {text_name}\nError: {error}"),
        ),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Sequences the document flows. Cheap to share between tasks behind an `Arc`.
pub struct Controller {
    screens: Arc<dyn Screens>,
    store: DocumentStore,
    runner: ConversionRunner,
}

impl Controller {
    pub fn new(screens: Arc<dyn Screens>, store: DocumentStore, runner: ConversionRunner) -> Self {
        Self { screens, store, runner }
    }

    /// Name → edit → save → convert → refresh.
    ///
    /// Returns the conversion outcome, or `None` when the flow stopped before
    /// converting (cancelled or a filesystem error).
    pub async fn new_document(&self) -> Option<ConversionOutcome> {
        let Some(name) = self.screens.prompt_name().await.confirmed() else {
            debug!("New document cancelled at name prompt");
            return None;
        };
        info!("Creating document '{}'", name);

        let opened = match self.store.open_for_edit(&name) {
            Ok(opened) => opened,
            Err(e) => {
                let path = self.store.layout().text_path(&name);
                self.report_io_error("open", &path, &e).await;
                return None;
            }
        };

        let edited = self
            .screens
            .edit_document(opened.path.clone(), opened.content)
            .await;
        let ScreenResult::Confirmed(content) = edited else {
            info!("Editing {} cancelled, file left as is", opened.path.display());
            self.screens.refresh_listing();
            return None;
        };

        if let Err(e) = self.store.write(&opened.path, &content) {
            self.report_io_error("save", &opened.path, &e).await;
            self.screens.refresh_listing();
            return None;
        }

        let outcome = self.convert_and_report(&name, &opened.path).await;
        self.screens.refresh_listing();
        Some(outcome)
    }

    /// Convert a listed document without opening the editor.
    pub async fn convert_existing(&self, record: &DocumentRecord) -> ConversionOutcome {
        let name = self.store.layout().logical_name(&record.path);
        debug!("Selected {} (document name '{}')", record.name, name);
        self.convert_and_report(&name, &record.path).await
    }

    /// Loading indicator around the conversion, then exactly one result dialog.
    pub async fn convert_and_report(&self, name: &str, text_path: &Path) -> ConversionOutcome {
        let loading = self.screens.show_loading(format!(
            "Converting {} to PDF...\n\nThis may take a few seconds.",
            file_name(text_path)
        ));
        let outcome = self.runner.convert(name, text_path).await;
        self.screens.dismiss(loading);

        let (title, message) = result_message(&outcome);
        self.screens.show_message(title, message).await;
        outcome
    }

    async fn report_io_error(&self, action: &str, path: &Path, error: &io::Error) {
        warn!("Could not {} {}: {}", action, path.display(), error);
        self.screens
            .show_message(
                ERROR_TITLE.to_string(),
                format!("Could not {action} {}\nError: {error}", file_name(path)),
            )
            .await;
    }
}
