//! Renderer-owned UI state and key mapping.
//!
//! The handler never sees raw keys. Keys either move local state (cursor,
//! scroll, text input) or become a [`UiIntent`].

use std::ops::Range;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::event::UiIntent;
use crate::presentation::view_models::{
    ModalViewModel, MyChatPageViewModel, PageViewModel, SearchPageViewModel, ShellScreenViewModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Nickname,
    Picture,
    Path,
}

impl InputKind {
    pub fn prompt(self) -> &'static str {
        match self {
            InputKind::Nickname => "닉네임",
            InputKind::Picture => "사진 파일 경로",
            InputKind::Path => "이동할 경로",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub kind: InputKind,
    pub buffer: String,
}

#[derive(Debug, Default)]
pub struct UiState {
    /// Selected row on the search page; `rooms.len()` is the footer row.
    pub cursor: usize,
    /// First visible row.
    pub top: usize,
    /// Rows that fit in the list area.
    pub capacity: usize,
    pub input: Option<TextInput>,
    generation: Option<u64>,
    last_report: Option<(u64, Range<usize>, Option<usize>)>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a new screen; a new filter generation resets the list position.
    pub fn on_update(&mut self, screen: &ShellScreenViewModel) {
        let PageViewModel::Search(search) = &screen.page else {
            self.generation = None;
            self.last_report = None;
            return;
        };
        if self.generation != Some(search.generation) {
            self.generation = Some(search.generation);
            self.cursor = 0;
            self.top = 0;
        }
        self.cursor = self.cursor.min(search.rooms.len());
        self.scroll_to_cursor();
    }

    pub fn set_capacity(&mut self, rows: usize) {
        self.capacity = rows.max(1);
        self.scroll_to_cursor();
    }

    /// Rows on screen, footer included.
    pub fn visible_rows(&self, room_count: usize) -> Range<usize> {
        let total = room_count + 1;
        let start = self.top.min(total);
        start..(start + self.capacity.max(1)).min(total)
    }

    /// A viewport report when anything the sentinel depends on moved since
    /// the last one.
    pub fn viewport_report(&mut self, search: &SearchPageViewModel) -> Option<UiIntent> {
        let rows = self.visible_rows(search.rooms.len());
        let key = (search.generation, rows.clone(), search.sentinel_row);
        if self.last_report.as_ref() == Some(&key) {
            return None;
        }
        self.last_report = Some(key);
        Some(UiIntent::Viewport(rows))
    }

    fn scroll_to_cursor(&mut self) {
        let capacity = self.capacity.max(1);
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + capacity {
            self.top = self.cursor + 1 - capacity;
        }
    }

    fn move_cursor(&mut self, delta: isize, room_count: usize) {
        let next = self.cursor.saturating_add_signed(delta);
        self.cursor = next.min(room_count);
        self.scroll_to_cursor();
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        screen: Option<&ShellScreenViewModel>,
    ) -> Option<UiIntent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UiIntent::Quit);
        }
        if self.input.is_some() {
            return self.handle_input_key(key);
        }

        let Some(screen) = screen else {
            return matches!(key.code, KeyCode::Char('q')).then_some(UiIntent::Quit);
        };

        let page_intent = match &screen.page {
            PageViewModel::Search(search) => self.search_key(key, search),
            PageViewModel::Create(_) => create_key(key),
            PageViewModel::MyChat(my_chat) => my_chat_key(key, my_chat),
            PageViewModel::MyPage(my_page) => {
                match key.code {
                    KeyCode::Char('e') => {
                        self.input = Some(TextInput {
                            kind: InputKind::Nickname,
                            buffer: my_page.profile.nickname.clone(),
                        });
                        return None;
                    }
                    KeyCode::Char('p') => {
                        self.input = Some(TextInput {
                            kind: InputKind::Picture,
                            buffer: String::new(),
                        });
                        return None;
                    }
                    _ => None,
                }
            }
            PageViewModel::Chat(_) => match key.code {
                KeyCode::Esc | KeyCode::Char('b') => Some(UiIntent::Navigate("/my-chat".into())),
                _ => None,
            },
            PageViewModel::Login(_) => match key.code {
                KeyCode::Enter => Some(UiIntent::Confirm),
                _ => None,
            },
        };
        if page_intent.is_some() {
            return page_intent;
        }

        match key.code {
            KeyCode::Char('q') => Some(UiIntent::Quit),
            KeyCode::Tab => Some(UiIntent::NextTab),
            KeyCode::Char(c @ '1'..='4') => Some(UiIntent::SwitchTab(c as usize - '1' as usize)),
            KeyCode::Char('o') => Some(UiIntent::AccountAction),
            KeyCode::Char(':') => {
                self.input = Some(TextInput {
                    kind: InputKind::Path,
                    buffer: "/".to_string(),
                });
                None
            }
            KeyCode::Esc => Some(UiIntent::Dismiss),
            _ => None,
        }
    }

    fn search_key(&mut self, key: KeyEvent, search: &SearchPageViewModel) -> Option<UiIntent> {
        if !matches!(search.modal, ModalViewModel::None) {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Some(UiIntent::Confirm),
                KeyCode::Char('n') | KeyCode::Esc => Some(UiIntent::Dismiss),
                _ => None,
            };
        }

        let count = search.rooms.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1, count);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1, count);
                None
            }
            KeyCode::PageUp => {
                self.move_cursor(-(self.capacity.max(1) as isize), count);
                None
            }
            KeyCode::PageDown => {
                self.move_cursor(self.capacity.max(1) as isize, count);
                None
            }
            KeyCode::Left => Some(UiIntent::CycleDeparture(-1)),
            KeyCode::Right => Some(UiIntent::CycleDeparture(1)),
            KeyCode::Char('[') => Some(UiIntent::CycleDestination(-1)),
            KeyCode::Char(']') => Some(UiIntent::CycleDestination(1)),
            KeyCode::Char('0') | KeyCode::Char('x') => Some(UiIntent::ClearFilter),
            KeyCode::Char('r') => Some(UiIntent::Retry),
            KeyCode::Enter => match search.rooms.get(self.cursor) {
                Some(room) => Some(UiIntent::SelectRoom(room.room_id)),
                None if search.failure.is_some() => Some(UiIntent::Retry),
                None => None,
            },
            _ => None,
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<UiIntent> {
        let input = self.input.as_mut()?;
        match key.code {
            KeyCode::Esc => {
                self.input = None;
                None
            }
            KeyCode::Backspace => {
                input.buffer.pop();
                None
            }
            KeyCode::Char(c) => {
                input.buffer.push(c);
                None
            }
            KeyCode::Enter => {
                let TextInput { kind, buffer } = self.input.take()?;
                let value = buffer.trim().to_string();
                match kind {
                    InputKind::Nickname => Some(UiIntent::SaveNickname(value)),
                    InputKind::Picture if !value.is_empty() => {
                        Some(UiIntent::UploadPicture(PathBuf::from(value)))
                    }
                    InputKind::Path if !value.is_empty() => Some(UiIntent::Navigate(value)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn create_key(key: KeyEvent) -> Option<UiIntent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiIntent::FocusField(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(UiIntent::FocusField(1)),
        KeyCode::Left | KeyCode::Char('-') => Some(UiIntent::Adjust(-1)),
        KeyCode::Right | KeyCode::Char('+') => Some(UiIntent::Adjust(1)),
        KeyCode::Enter => Some(UiIntent::Submit),
        _ => None,
    }
}

fn my_chat_key(key: KeyEvent, page: &MyChatPageViewModel) -> Option<UiIntent> {
    if page.confirm_leave {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Some(UiIntent::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => Some(UiIntent::Dismiss),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('r') => Some(UiIntent::Refresh),
        KeyCode::Char('d') => Some(UiIntent::Leave),
        KeyCode::Enter => page.pot.as_ref().map(|pot| UiIntent::OpenChat(pot.room_id)),
        _ => None,
    }
}
