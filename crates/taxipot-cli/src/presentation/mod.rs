//! # Presentation Layer
//!
//! MVVM-style split between the engine and the terminal:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//!   (commands,      (pure fns)       (Serialize)      (console /      (text, JSON,
//!    shell)                                             ratatui)        terminal UI)
//! ```
//!
//! - `view_models/`: plain data, serializable as-is for `--format json`.
//! - `presenters/`: domain records → view models (time zone shift, labels).
//! - `views/`: `fmt::Display` text views and ratatui widgets. Layout only.
//! - `renderers/`: console output and the TUI event loop.
//! - `formatters/`: shared string helpers (Korean dates, won amounts).

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{
    CommandResultViewModel, CreateView, Guidance, OutputFormat, StatusBadge, StatusLevel,
    ViewMode,
};
