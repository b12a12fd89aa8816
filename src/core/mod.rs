//! # Core Application Logic
//!
//! Documents, conversion, and the screen state machine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │            CORE              │
//!                    │       (this module)          │
//!                    │                              │
//!                    │  • navigation (flows)        │
//!                    │  • screen_stack (LIFO)       │
//!                    │  • conversion (script)       │
//!                    │  • documents (filesystem)    │
//!                    │  • config (JSON)             │
//!                    └──────────────┬───────────────┘
//!                                   │ Screens trait
//!                                   ▼
//!                            ┌────────────┐
//!                            │    TUI     │
//!                            │  Adapter   │
//!                            │ (ratatui)  │
//!                            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `AppConfig` and `load_or_init`
//! - [`documents`]: `DocumentStore`, `FileLayout`, `DocumentRecord`
//! - [`conversion`]: `ConversionRunner`, `ConversionOutcome`, `Opener`
//! - [`screen_stack`]: `ScreenStack` and the push/resolve/dispose signals
//! - [`navigation`]: `Controller` flows and the `Screens` trait they drive

pub mod config;
pub mod conversion;
pub mod documents;
pub mod navigation;
pub mod screen_stack;
