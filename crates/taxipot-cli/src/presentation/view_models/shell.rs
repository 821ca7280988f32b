//! Screen contract between the interactive shell and the TUI renderer.

use serde::Serialize;

use super::account::{PotViewModel, ProfileViewModel};
use super::common::StatusBadge;
use super::room::RoomCardViewModel;

#[derive(Debug, Clone, Serialize)]
pub struct ShellScreenViewModel {
    pub path: String,
    pub logged_in: bool,
    pub tabs: Vec<TabViewModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<StatusBadge>,
    pub page: PageViewModel,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabViewModel {
    pub label: String,
    pub hotkey: char,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageViewModel {
    Search(SearchPageViewModel),
    Create(CreatePageViewModel),
    MyChat(MyChatPageViewModel),
    MyPage(MyPageViewModel),
    Chat(ChatPageViewModel),
    Login(LoginPageViewModel),
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPageViewModel {
    /// Changes whenever the filter does; the renderer resets its cursor.
    pub generation: u64,
    pub departure: String,
    pub destination: String,
    pub rooms: Vec<RoomCardViewModel>,
    pub has_more: bool,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    /// Row observed for infinite scrolling (`rooms.len()` when active).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel_row: Option<usize>,
    pub modal: ModalViewModel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalViewModel {
    None,
    LoginPrompt,
    JoinConfirm {
        #[serde(skip_serializing_if = "Option::is_none")]
        room: Option<RoomCardViewModel>,
        pending: bool,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FormFieldViewModel {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePageViewModel {
    pub fields: Vec<FormFieldViewModel>,
    pub focused: usize,
    pub submitting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyChatPageViewModel {
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pot: Option<PotViewModel>,
    pub confirm_leave: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyPageViewModel {
    pub profile: ProfileViewModel,
    pub uploading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatPageViewModel {
    pub room_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pot: Option<PotViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPageViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub logged_in: bool,
}
