//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::conversion::Opener;
use crate::core::navigation::Screens;
use crate::core::screen_stack::{ScreenId, ScreenIds, ScreenResult};

/// One interaction a flow had with the UI, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCall {
    PromptName,
    Edit { path: PathBuf, content: String },
    Confirm { title: String },
    ShowLoading(ScreenId, String),
    Dismiss(ScreenId),
    Message { title: String, message: String },
    Refresh,
}

/// A `Screens` fake that answers dialogs from pre-loaded queues and records
/// every call. An empty queue answers `Cancelled`.
#[derive(Default)]
pub struct ScriptedScreens {
    names: Mutex<VecDeque<ScreenResult<String>>>,
    edits: Mutex<VecDeque<ScreenResult<String>>>,
    confirms: Mutex<VecDeque<ScreenResult<bool>>>,
    ids: ScreenIds,
    calls: Mutex<Vec<ScreenCall>>,
}

impl ScriptedScreens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(self, answer: ScreenResult<String>) -> Self {
        self.names.lock().unwrap().push_back(answer);
        self
    }

    pub fn edit(self, answer: ScreenResult<String>) -> Self {
        self.edits.lock().unwrap().push_back(answer);
        self
    }

    pub fn confirm(self, answer: ScreenResult<bool>) -> Self {
        self.confirms.lock().unwrap().push_back(answer);
        self
    }

    pub fn calls(&self) -> Vec<ScreenCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ScreenCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next_answer<T>(queue: &Mutex<VecDeque<ScreenResult<T>>>) -> ScreenResult<T> {
    queue.lock().unwrap().pop_front().unwrap_or(ScreenResult::Cancelled)
}

#[async_trait]
impl Screens for ScriptedScreens {
    async fn prompt_name(&self) -> ScreenResult<String> {
        self.record(ScreenCall::PromptName);
        next_answer(&self.names)
    }

    async fn edit_document(&self, path: PathBuf, content: String) -> ScreenResult<String> {
        self.record(ScreenCall::Edit { path, content });
        next_answer(&self.edits)
    }

    async fn confirm(&self, title: String, _message: String) -> ScreenResult<bool> {
        self.record(ScreenCall::Confirm { title });
        next_answer(&self.confirms)
    }

    fn show_loading(&self, message: String) -> ScreenId {
        let id = self.ids.next();
        self.record(ScreenCall::ShowLoading(id, message));
        id
    }

    fn dismiss(&self, id: ScreenId) {
        self.record(ScreenCall::Dismiss(id));
    }

    async fn show_message(&self, title: String, message: String) {
        self.record(ScreenCall::Message { title, message });
    }

    fn refresh_listing(&self) {
        self.record(ScreenCall::Refresh);
    }
}

/// Records opened paths instead of launching a viewer.
#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<PathBuf>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl Opener for RecordingOpener {
    fn open_best_effort(&self, path: &Path) {
        self.opened.lock().unwrap().push(path.to_path_buf());
    }
}

/// Write an executable `/bin/sh` script into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}
