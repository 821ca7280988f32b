//! Ratatui widgets for the interactive shell.
//!
//! Each view borrows its view model and maps it to widgets. Formatting lives
//! in `formatters`; cursor and scroll come from the renderer.

pub mod chrome;
pub mod pages;
pub mod search;

pub use chrome::{BottomNavView, HeaderView, StatusLineView};
pub use pages::{ChatPageView, CreatePageView, LoginPageView, MyChatPageView, MyPageView};
pub use search::SearchPageView;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;

use crate::presentation::view_models::StatusLevel;

pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Cyan,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}

/// Box of `width` x `height` centered in `area`, clamped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
