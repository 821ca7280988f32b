use std::fmt;

/// Pages reachable inside the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`; shows the search page.
    Home,
    Login,
    SearchRoom,
    CreateRoom,
    MyChat,
    MyPage,
    Chat(u32),
}

impl Route {
    /// Unknown paths land on the search page.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/search-room" => Route::SearchRoom,
            "/create-room" => Route::CreateRoom,
            "/my-chat" => Route::MyChat,
            "/my-page" => Route::MyPage,
            other => match other.strip_prefix("/chat/").map(str::parse::<u32>) {
                Some(Ok(room_id)) => Route::Chat(room_id),
                _ => Route::SearchRoom,
            },
        }
    }

    /// Tab highlighted in the bottom bar, if any.
    pub fn tab(self) -> Option<Tab> {
        match self {
            Route::Home | Route::SearchRoom => Some(Tab::RoomSearch),
            Route::CreateRoom => Some(Tab::RoomCreate),
            Route::MyChat | Route::Chat(_) => Some(Tab::MyChat),
            Route::MyPage => Some(Tab::MyPage),
            Route::Login => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::SearchRoom => write!(f, "/search-room"),
            Route::CreateRoom => write!(f, "/create-room"),
            Route::MyChat => write!(f, "/my-chat"),
            Route::MyPage => write!(f, "/my-page"),
            Route::Chat(id) => write!(f, "/chat/{}", id),
        }
    }
}

/// Bottom navigation entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    RoomSearch,
    RoomCreate,
    MyChat,
    MyPage,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::RoomSearch, Tab::RoomCreate, Tab::MyChat, Tab::MyPage];

    pub fn label(self) -> &'static str {
        match self {
            Tab::RoomSearch => "방 찾기",
            Tab::RoomCreate => "방 만들기",
            Tab::MyChat => "내 채팅",
            Tab::MyPage => "마이페이지",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Tab::RoomSearch => '1',
            Tab::RoomCreate => '2',
            Tab::MyChat => '3',
            Tab::MyPage => '4',
        }
    }

    /// `0`-based position; out of range returns `None`.
    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn route(self) -> Route {
        match self {
            Tab::RoomSearch => Route::SearchRoom,
            Tab::RoomCreate => Route::CreateRoom,
            Tab::MyChat => Route::MyChat,
            Tab::MyPage => Route::MyPage,
        }
    }

    pub fn next(self) -> Tab {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}
