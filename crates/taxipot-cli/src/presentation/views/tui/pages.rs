//! The secondary pages: create, my chat, my page, chat and login.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::presentation::formatters::{format_departure, headcount, status_label, won};
use crate::presentation::view_models::{
    ChatPageViewModel, CreatePageViewModel, LoginPageViewModel, MyChatPageViewModel,
    MyPageViewModel, PotViewModel,
};
use crate::presentation::views::account::{GUEST_EMAIL, NO_CURRENT_POT};

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

fn pot_lines(pot: &PotViewModel) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!("{} → {}", pot.departure, pot.destination),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                status_label(pot.is_full),
                Style::default().fg(if pot.is_full { Color::Red } else { Color::Green }),
            ),
        ]),
        Line::from(format!("🕒 {}", format_departure(&pot.departure_time))),
        Line::from(format!(
            "{}  (최소 {}명)",
            headcount(pot.current_count, pot.max_capacity),
            pot.min_capacity
        )),
        Line::from(format!("💰 {}", won(pot.estimated_fee))),
        Line::from(format!("👑 {}", pot.host_name)),
    ]
}

pub struct CreatePageView<'a> {
    model: &'a CreatePageViewModel,
}

impl<'a> CreatePageView<'a> {
    pub fn new(model: &'a CreatePageViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for CreatePageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = self
            .model
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.model.focused;
                let marker = if focused { "▶ " } else { "  " };
                let value_style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::raw(format!("{:<10}", field.label)),
                    Span::styled(format!(" ◀ {} ▶ ", field.value), value_style),
                ])
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(if self.model.submitting {
            Line::from(Span::styled("방을 만드는 중...", Style::default().fg(Color::Cyan)))
        } else {
            Line::from(vec![
                key("[↑/↓]"),
                Span::raw(" 항목  "),
                key("[←/→]"),
                Span::raw(" 변경  "),
                key("[Enter]"),
                Span::raw(" 방 만들기"),
            ])
        });

        Paragraph::new(lines).block(titled("방 만들기")).render(area, buf);
    }
}

pub struct MyChatPageView<'a> {
    model: &'a MyChatPageViewModel,
}

impl<'a> MyChatPageView<'a> {
    pub fn new(model: &'a MyChatPageViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for MyChatPageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = if self.model.loading {
            vec![Line::from("불러오는 중...")]
        } else if let Some(pot) = &self.model.pot {
            let mut lines = pot_lines(pot);
            lines.push(Line::from(""));
            if self.model.confirm_leave {
                lines.push(Line::from(Span::styled(
                    "정말로 현재 방에서 나가시겠습니까?  [y] 나가기  [n] 취소",
                    Style::default().fg(Color::Yellow),
                )));
            } else {
                lines.push(Line::from(vec![
                    key("[Enter]"),
                    Span::raw(" 채팅방  "),
                    key("[d]"),
                    Span::raw(" 방 나가기  "),
                    key("[r]"),
                    Span::raw(" 새로고침"),
                ]));
            }
            lines
        } else {
            vec![
                Line::from(NO_CURRENT_POT),
                Line::from(""),
                Line::from(vec![key("[r]"), Span::raw(" 새로고침")]),
            ]
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled("내 채팅"))
            .render(area, buf);
    }
}

pub struct MyPageView<'a> {
    model: &'a MyPageViewModel,
}

impl<'a> MyPageView<'a> {
    pub fn new(model: &'a MyPageViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for MyPageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let profile = &self.model.profile;
        let mut lines = vec![
            Line::from(vec![
                Span::raw("닉네임   "),
                Span::styled(
                    profile.nickname.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!(
                "이메일   {}",
                profile.email.as_deref().unwrap_or(GUEST_EMAIL)
            )),
            Line::from(format!(
                "사진     {}",
                profile.profile_image.as_deref().unwrap_or("-")
            )),
            Line::from(""),
        ];
        if self.model.uploading {
            lines.push(Line::from(Span::styled(
                "사진 올리는 중...",
                Style::default().fg(Color::Cyan),
            )));
        } else {
            lines.push(Line::from(vec![
                key("[e]"),
                Span::raw(" 닉네임 수정  "),
                key("[p]"),
                Span::raw(" 사진 올리기  "),
                key("[o]"),
                Span::raw(if profile.logged_in { " 로그아웃" } else { " 로그인" }),
            ]));
        }

        Paragraph::new(lines).block(titled("마이페이지")).render(area, buf);
    }
}

pub struct ChatPageView<'a> {
    model: &'a ChatPageViewModel,
}

impl<'a> ChatPageView<'a> {
    pub fn new(model: &'a ChatPageViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for ChatPageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = match &self.model.pot {
            Some(pot) => pot_lines(pot),
            None => vec![Line::from("방 정보를 불러오는 중...")],
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "채팅은 이 클라이언트에서 지원하지 않습니다.",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(vec![key("[b]"), Span::raw(" 내 채팅으로")]));

        let title = format!("채팅방 #{}", self.model.room_id);
        Paragraph::new(lines).block(titled(&title)).render(area, buf);
    }
}

pub struct LoginPageView<'a> {
    model: &'a LoginPageViewModel,
}

impl<'a> LoginPageView<'a> {
    pub fn new(model: &'a LoginPageViewModel) -> Self {
        Self { model }
    }
}

impl<'a> Widget for LoginPageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        if self.model.logged_in {
            lines.push(Line::from("이미 로그인되어 있습니다."));
        } else {
            lines.push(Line::from("서울대학교 계정(@snu.ac.kr)으로 로그인하세요."));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                key("[Enter]"),
                Span::raw(" 브라우저 로그인 주소 열기"),
            ]));
            if let Some(url) = &self.model.url {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    url.as_str(),
                    Style::default().fg(Color::Cyan),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "로그인 후 받은 토큰은 `taxipot login --token <JWT>` 로 저장합니다.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled("로그인"))
            .render(area, buf);
    }
}
