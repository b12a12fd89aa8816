//! # Screen Stack
//!
//! A last-in-first-out stack of screens. Only the top screen is interactive;
//! everything below it is frozen with its local state intact.
//!
//! Every pushed screen comes with a [`Completion`] / [`Pending`] pair. The
//! pusher awaits the `Pending` half and stays suspended until the screen has
//! been popped and disposed:
//!
//! ```text
//!  pusher                 stack owner                  screen
//!    │  push(id, screen)       │                          │
//!    ├────────────────────────▶│  Active                  │
//!    │  pending.wait() ...     │ ◀── resolve(result) ─────┤
//!    │                         │  Resolving               │
//!    │                         │  collect_resolved()      │
//!    │ ◀── result ─────────────┤  Disposed                │
//! ```
//!
//! A screen can only be popped while it is on top. A screen that is resolved
//! while something sits above it waits in `Resolving` until it surfaces.

use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

/// What a screen hands back to whoever pushed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenResult<T> {
    Cancelled,
    Confirmed(T),
}

impl<T> ScreenResult<T> {
    pub fn confirmed(self) -> Option<T> {
        match self {
            ScreenResult::Confirmed(value) => Some(value),
            ScreenResult::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScreenResult::Cancelled)
    }
}

/// Identifies one pushed screen for the lifetime of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

impl ScreenId {
    /// The document list, pushed once at startup and never popped.
    pub const ROOT: ScreenId = ScreenId(0);
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh ids. Shared by everything that pushes.
#[derive(Debug)]
pub struct ScreenIds {
    next: AtomicU64,
}

impl ScreenIds {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(ScreenId::ROOT.0 + 1) }
    }

    pub fn next(&self) -> ScreenId {
        ScreenId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ScreenIds {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Completion signal
// ============================================================================

/// Screen-side half of a push: records the result and releases the pusher
/// when the screen is disposed.
#[derive(Debug)]
pub struct Completion<T> {
    sender: Option<oneshot::Sender<ScreenResult<T>>>,
    resolved: Option<ScreenResult<T>>,
}

/// Pusher-side half of a push.
#[derive(Debug)]
pub struct Pending<T> {
    receiver: oneshot::Receiver<ScreenResult<T>>,
}

/// Create a linked completion signal for a new screen.
pub fn completion<T>() -> (Completion<T>, Pending<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        Completion { sender: Some(sender), resolved: None },
        Pending { receiver },
    )
}

impl<T> Completion<T> {
    /// Record the screen's result, moving it from Active to Resolving.
    ///
    /// Returns `false` (and keeps the first result) if it was already
    /// resolved: a screen resolves at most once.
    pub fn resolve(&mut self, result: ScreenResult<T>) -> bool {
        if self.resolved.is_some() {
            warn!("Ignoring second resolution of a screen");
            return false;
        }
        self.resolved = Some(result);
        true
    }

    pub fn is_resolving(&self) -> bool {
        self.resolved.is_some()
    }

    /// Hand the recorded result (or `Cancelled`) to the waiting pusher.
    pub fn dispose(mut self) {
        let result = self.resolved.take().unwrap_or(ScreenResult::Cancelled);
        if let Some(sender) = self.sender.take() {
            if sender.send(result).is_err() {
                debug!("Screen disposed after its pusher went away");
            }
        }
    }
}

impl<T> Pending<T> {
    /// Suspend until the screen is disposed. A screen dropped without being
    /// disposed reads as `Cancelled`.
    pub async fn wait(self) -> ScreenResult<T> {
        self.receiver.await.unwrap_or(ScreenResult::Cancelled)
    }
}

// ============================================================================
// Stack
// ============================================================================

/// Anything that can live on a [`ScreenStack`].
pub trait StackScreen {
    /// True once the screen has a result and is waiting to be popped.
    fn is_resolving(&self) -> bool;

    /// Release the screen's pusher. Called exactly once, after popping.
    fn dispose(self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    Empty,
    NotTop { requested: ScreenId, top: ScreenId },
    Unknown(ScreenId),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Empty => write!(f, "screen stack is empty"),
            StackError::NotTop { requested, top } => {
                write!(f, "cannot pop screen {requested}: {top} is on top")
            }
            StackError::Unknown(id) => write!(f, "no screen {id} on the stack"),
        }
    }
}

impl std::error::Error for StackError {}

pub struct ScreenStack<S> {
    entries: Vec<(ScreenId, S)>,
}

impl<S: StackScreen> ScreenStack<S> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Put `screen` on top. The previous top is frozen, not dropped.
    pub fn push(&mut self, id: ScreenId, screen: S) {
        debug!("Push screen {} (depth {})", id, self.entries.len() + 1);
        self.entries.push((id, screen));
    }

    /// Pop and dispose screen `id`, which must be the top.
    pub fn pop(&mut self, id: ScreenId) -> Result<(), StackError> {
        let top = self.top_id().ok_or(StackError::Empty)?;
        if top != id {
            return Err(if self.contains(id) {
                StackError::NotTop { requested: id, top }
            } else {
                StackError::Unknown(id)
            });
        }
        if let Some((_, screen)) = self.entries.pop() {
            debug!("Pop screen {} (depth {})", id, self.entries.len());
            screen.dispose();
        }
        Ok(())
    }

    /// Pop every resolving screen from the top down, stopping at the first
    /// one that is still active. Returns the disposed ids, in pop order.
    pub fn collect_resolved(&mut self) -> Vec<ScreenId> {
        let mut disposed = Vec::new();
        while self.top().is_some_and(|s| s.is_resolving()) {
            let Some(id) = self.top_id() else { break };
            if self.pop(id).is_err() {
                break;
            }
            disposed.push(id);
        }
        disposed
    }

    pub fn top(&self) -> Option<&S> {
        self.entries.last().map(|(_, s)| s)
    }

    pub fn top_mut(&mut self) -> Option<&mut S> {
        self.entries.last_mut().map(|(_, s)| s)
    }

    pub fn top_id(&self) -> Option<ScreenId> {
        self.entries.last().map(|(id, _)| *id)
    }

    /// Access a screen anywhere in the stack, e.g. to apply the outcome of a
    /// dialog it was waiting on.
    pub fn get_mut(&mut self, id: ScreenId) -> Option<&mut S> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, s)| s)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (ScreenId, &S)> {
        self.entries.iter().map(|(id, s)| (*id, s))
    }

    /// Bottom to top, mutable (rendering updates list/scroll state).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ScreenId, &mut S)> {
        self.entries.iter_mut().map(|(id, s)| (*id, s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: StackScreen> Default for ScreenStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
