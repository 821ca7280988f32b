//! Text views for one-shot commands (`fmt::Display`) and ratatui widgets for
//! the shell (`tui`).

pub mod account;
pub mod landmark;
pub mod room;
pub mod tui;
