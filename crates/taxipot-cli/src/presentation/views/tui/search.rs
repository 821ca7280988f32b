//! Search page: filter bar, card list with footer row, confirmation modal.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered;
use crate::presentation::formatters::{format_departure, headcount, status_label};
use crate::presentation::view_models::{ModalViewModel, RoomCardViewModel, SearchPageViewModel};

/// Terminal rows taken by one room card, separator included.
pub const CARD_HEIGHT: u16 = 3;

pub const SEARCH_TITLE: &str = "택시팟 찾기";
pub const EMPTY_RESULT: &str = "조건에 맞는 방이 없습니다.";
pub const LOAD_FAILED: &str = "방 목록을 불러오는데 실패했습니다.";

pub struct SearchPageView<'a> {
    model: &'a SearchPageViewModel,
    cursor: usize,
    top: usize,
}

impl<'a> SearchPageView<'a> {
    pub fn new(model: &'a SearchPageViewModel, cursor: usize, top: usize) -> Self {
        Self { model, cursor, top }
    }

    fn render_filter(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                SEARCH_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let key = Style::default().fg(Color::Yellow);
        Paragraph::new(Line::from(vec![
            Span::styled("[←/→] ", key),
            Span::raw(self.model.departure.as_str()),
            Span::raw("  →  "),
            Span::styled("[ [/] ] ", key),
            Span::raw(self.model.destination.as_str()),
            Span::styled("   [x] 초기화", Style::default().fg(Color::DarkGray)),
        ]))
        .block(block)
        .render(area, buf);
    }

    fn render_card(&self, room: &RoomCardViewModel, selected: bool, area: Rect, buf: &mut Buffer) {
        let base = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let badge = if room.is_full {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} → {}", room.departure, room.destination),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(status_label(room.is_full), badge),
            ]),
            Line::from(format!(
                "🕒 {}   {}   👑 {}",
                format_departure(&room.departure_time),
                headcount(room.current_capacity, room.max_capacity),
                room.host_name
            )),
        ];
        Paragraph::new(lines).style(base).render(area, buf);
    }

    fn footer_text(&self) -> (String, Style) {
        let m = self.model;
        if let Some(failure) = &m.failure {
            (
                format!("{} ({})  [r] 다시 시도", LOAD_FAILED, failure),
                Style::default().fg(Color::Red),
            )
        } else if m.loading {
            ("불러오는 중...".to_string(), Style::default().fg(Color::Cyan))
        } else if m.rooms.is_empty() {
            (EMPTY_RESULT.to_string(), Style::default().fg(Color::DarkGray))
        } else if m.has_more {
            ("▼ 더 보기".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (String::new(), Style::default())
        }
    }

    fn render_list(&self, area: Rect, buf: &mut Buffer) {
        let row_height = CARD_HEIGHT;
        let mut y = area.y;
        let bottom = area.y + area.height;
        let total = self.model.rooms.len() + 1;

        for row in self.top..total {
            if y + row_height > bottom {
                break;
            }
            let cell = Rect::new(area.x, y, area.width, row_height - 1);
            match self.model.rooms.get(row) {
                Some(room) => self.render_card(room, row == self.cursor, cell, buf),
                None => {
                    let (text, style) = self.footer_text();
                    let style = if row == self.cursor {
                        style.add_modifier(Modifier::REVERSED)
                    } else {
                        style
                    };
                    Paragraph::new(Line::from(Span::styled(text, style)))
                        .centered()
                        .render(cell, buf);
                }
            }
            y += row_height;
        }
    }

    fn render_modal(&self, area: Rect, buf: &mut Buffer) {
        let (title, body): (&str, Vec<Line>) = match &self.model.modal {
            ModalViewModel::None => return,
            ModalViewModel::LoginPrompt => (
                "로그인 필요",
                vec![
                    Line::from("방에 참여하려면 로그인이 필요합니다."),
                    Line::from("로그인 페이지로 이동할까요?"),
                    Line::from(""),
                    Line::from("[y] 로그인   [n] 취소"),
                ],
            ),
            ModalViewModel::JoinConfirm { room, pending } => {
                let mut lines = Vec::new();
                if let Some(room) = room {
                    lines.push(Line::from(format!("{} → {}", room.departure, room.destination)));
                    lines.push(Line::from(format!(
                        "🕒 {}  {}",
                        format_departure(&room.departure_time),
                        headcount(room.current_capacity, room.max_capacity)
                    )));
                }
                lines.push(Line::from("이 방에 참여하시겠습니까?"));
                lines.push(Line::from(""));
                lines.push(if *pending {
                    Line::from(Span::styled("참여 중...", Style::default().fg(Color::Cyan)))
                } else {
                    Line::from("[y] 참여   [n] 취소")
                });
                ("방 참여", lines)
            }
        };

        let height = body.len() as u16 + 2;
        let popup = centered(area, 44, height);
        Clear.render(popup, buf);
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(title),
            )
            .render(popup, buf);
    }
}

impl<'a> Widget for SearchPageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [filter, list] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
        self.render_filter(filter, buf);
        self.render_list(list, buf);
        self.render_modal(area, buf);
    }
}
