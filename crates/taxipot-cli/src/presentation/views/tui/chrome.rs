//! Header, bottom navigation and the one-line status/input strip.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::status_level_to_color;
use crate::presentation::view_models::{ShellScreenViewModel, StatusBadge, TabViewModel};

pub struct HeaderView<'a> {
    screen: &'a ShellScreenViewModel,
}

impl<'a> HeaderView<'a> {
    pub fn new(screen: &'a ShellScreenViewModel) -> Self {
        Self { screen }
    }
}

impl<'a> Widget for HeaderView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(16)]).areas(area);

        Paragraph::new(Line::from(vec![
            Span::styled(
                "🚕 taxipot ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(&self.screen.path, Style::default().fg(Color::DarkGray)),
        ]))
        .render(left, buf);

        let account = if self.screen.logged_in { "로그아웃" } else { "로그인" };
        Paragraph::new(Line::from(vec![
            Span::styled("[o]", Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}", account)),
        ]))
        .right_aligned()
        .render(right, buf);
    }
}

pub struct BottomNavView<'a> {
    tabs: &'a [TabViewModel],
}

impl<'a> BottomNavView<'a> {
    pub fn new(tabs: &'a [TabViewModel]) -> Self {
        Self { tabs }
    }
}

impl<'a> Widget for BottomNavView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.tabs.is_empty() {
            return;
        }
        let constraints = vec![Constraint::Ratio(1, self.tabs.len() as u32); self.tabs.len()];
        let cells = Layout::horizontal(constraints).split(inner);

        for (tab, cell) in self.tabs.iter().zip(cells.iter()) {
            let style = if tab.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Paragraph::new(Line::from(format!("{} {}", tab.hotkey, tab.label)))
                .centered()
                .style(style)
                .render(*cell, buf);
        }
    }
}

/// Bottom strip: text input when editing, else the notice, else key help.
pub struct StatusLineView<'a> {
    notice: Option<&'a StatusBadge>,
    input: Option<(&'a str, &'a str)>,
    help: &'a str,
}

impl<'a> StatusLineView<'a> {
    pub fn new(notice: Option<&'a StatusBadge>, help: &'a str) -> Self {
        Self {
            notice,
            input: None,
            help,
        }
    }

    pub fn with_input(mut self, prompt: &'a str, buffer: &'a str) -> Self {
        self.input = Some((prompt, buffer));
        self
    }
}

impl<'a> Widget for StatusLineView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = if let Some((prompt, buffer)) = self.input {
            Line::from(vec![
                Span::styled(format!("{}: ", prompt), Style::default().fg(Color::Yellow)),
                Span::raw(buffer),
                Span::styled("█", Style::default().fg(Color::Yellow)),
            ])
        } else if let Some(notice) = self.notice {
            Line::from(Span::styled(
                notice.line(),
                Style::default().fg(status_level_to_color(notice.level)),
            ))
        } else {
            Line::from(Span::styled(self.help, Style::default().fg(Color::DarkGray)))
        };
        Paragraph::new(line).render(area, buf);
    }
}
