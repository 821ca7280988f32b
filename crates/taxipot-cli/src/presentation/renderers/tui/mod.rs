//! Terminal renderer for the interactive shell.
//!
//! - Owns the terminal and UI-only state (cursor, scroll, text input)
//! - Does not own data; screens arrive as [`TuiEvent::Update`]
//! - Maps keys to [`UiIntent`]s and reports the visible list rows so the
//!   handler can drive infinite scrolling

mod event;
mod state;

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self as term_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

pub use event::{IntentSink, TuiEvent, UiIntent};
pub use state::{InputKind, TextInput, UiState};

use crate::presentation::view_models::{PageViewModel, ShellScreenViewModel};
use crate::presentation::views::tui::search::CARD_HEIGHT;
use crate::presentation::views::tui::{
    BottomNavView, ChatPageView, CreatePageView, HeaderView, LoginPageView, MyChatPageView,
    MyPageView, SearchPageView, StatusLineView,
};

/// Header, status strip, bottom bar and the search filter box.
const CHROME_ROWS: u16 = 1 + 1 + 2 + 3;

fn list_capacity(height: u16) -> usize {
    (height.saturating_sub(CHROME_ROWS) / CARD_HEIGHT).max(1) as usize
}

fn help_for(page: &PageViewModel) -> &'static str {
    match page {
        PageViewModel::Search(_) => {
            "[↑/↓] 선택  [Enter] 참여  [←/→] 출발지  [ [/] ] 도착지  [x] 초기화  [1-4] 탭  [q] 종료"
        }
        PageViewModel::Create(_) => "[↑/↓] 항목  [←/→] 변경  [Enter] 방 만들기  [1-4] 탭  [q] 종료",
        PageViewModel::MyChat(_) => "[r] 새로고침  [d] 방 나가기  [1-4] 탭  [q] 종료",
        PageViewModel::MyPage(_) => "[e] 닉네임  [p] 사진  [o] 로그아웃  [1-4] 탭  [q] 종료",
        PageViewModel::Chat(_) => "[b] 돌아가기  [1-4] 탭  [q] 종료",
        PageViewModel::Login(_) => "[Enter] 로그인  [1-4] 탭  [q] 종료",
    }
}

pub struct TuiRenderer<S: IntentSink> {
    sink: S,
    current_screen: Option<ShellScreenViewModel>,
    ui: UiState,
    should_quit: bool,
    error_message: Option<String>,
}

impl<S: IntentSink> TuiRenderer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current_screen: None,
            ui: UiState::new(),
            should_quit: false,
            error_message: None,
        }
    }

    pub fn run(mut self, rx: Receiver<TuiEvent>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // raw mode swallows SIGINT from the keyboard, but not `kill -INT`
        let _ = ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(130);
        });

        let result = self.event_loop(&mut terminal, rx);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: Receiver<TuiEvent>,
    ) -> Result<()> {
        loop {
            let size = terminal.size()?;
            self.ui.set_capacity(list_capacity(size.height));
            self.report_viewport();

            terminal.draw(|f| self.render(f))?;

            if term_event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = term_event::read()?
                && let Some(intent) = self.ui.handle_key(key, self.current_screen.as_ref())
                && !self.sink.send_intent(intent)
            {
                self.should_quit = true;
            }

            loop {
                match rx.try_recv() {
                    Ok(TuiEvent::Update(screen)) => {
                        self.ui.on_update(&screen);
                        self.current_screen = Some(*screen);
                        self.error_message = None;
                    }
                    Ok(TuiEvent::Error(msg)) => self.error_message = Some(msg),
                    Ok(TuiEvent::Shutdown) | Err(TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                    Err(TryRecvError::Empty) => break,
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn report_viewport(&mut self) {
        let Some(ShellScreenViewModel {
            page: PageViewModel::Search(search),
            ..
        }) = &self.current_screen
        else {
            return;
        };
        if let Some(intent) = self.ui.viewport_report(search)
            && !self.sink.send_intent(intent)
        {
            self.should_quit = true;
        }
    }

    fn render(&self, f: &mut Frame) {
        let size = f.area();

        if let Some(error_msg) = &self.error_message {
            let error = Paragraph::new(Span::styled(
                error_msg.as_str(),
                Style::default().fg(Color::Red),
            ))
            .block(Block::default().title("Error").borders(Borders::ALL));
            f.render_widget(error, size);
            return;
        }

        let Some(screen) = &self.current_screen else {
            let loading = Paragraph::new("불러오는 중...")
                .block(Block::default().title("taxipot").borders(Borders::ALL));
            f.render_widget(loading, size);
            return;
        };

        let [header, body, status, nav] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(size);

        f.render_widget(HeaderView::new(screen), header);

        match &screen.page {
            PageViewModel::Search(page) => {
                f.render_widget(SearchPageView::new(page, self.ui.cursor, self.ui.top), body)
            }
            PageViewModel::Create(page) => f.render_widget(CreatePageView::new(page), body),
            PageViewModel::MyChat(page) => f.render_widget(MyChatPageView::new(page), body),
            PageViewModel::MyPage(page) => f.render_widget(MyPageView::new(page), body),
            PageViewModel::Chat(page) => f.render_widget(ChatPageView::new(page), body),
            PageViewModel::Login(page) => f.render_widget(LoginPageView::new(page), body),
        }

        let mut status_line = StatusLineView::new(screen.notice.as_ref(), help_for(&screen.page));
        if let Some(input) = &self.ui.input {
            status_line = status_line.with_input(input.kind.prompt(), &input.buffer);
        }
        f.render_widget(status_line, status);

        f.render_widget(BottomNavView::new(&screen.tabs), nav);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_capacity_leaves_room_for_chrome() {
        assert_eq!(list_capacity(40), 11);
        assert_eq!(list_capacity(5), 1);
    }
}
