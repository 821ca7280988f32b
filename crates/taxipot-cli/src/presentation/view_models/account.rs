use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

// --------------------------------------------------------
// Data Definitions (ViewModels)
// --------------------------------------------------------

/// The pot the signed-in user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotViewModel {
    pub room_id: u32,
    pub departure: String,
    pub destination: String,
    pub departure_time: DateTime<FixedOffset>,
    pub host_name: String,
    pub current_count: u32,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub estimated_fee: u32,
    pub status: String,
    pub is_full: bool,
}

#[derive(Debug, Serialize)]
pub struct CurrentPotViewModel {
    pub pot: Option<PotViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileViewModel {
    pub logged_in: bool,
    pub email: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoginViewModel {
    /// Open this URL in a browser to obtain a token.
    Redirect { url: String },
    SignedIn { email: String },
}

#[derive(Debug, Serialize)]
pub struct LogoutViewModel {
    pub server_notified: bool,
    pub credential_removed: bool,
}

#[derive(Debug, Serialize)]
pub struct PictureUploadedViewModel {
    pub file_name: String,
    pub bytes: usize,
}

// --------------------------------------------------------
// CreateView Trait Implementations (Bridge to Views)
// --------------------------------------------------------

impl CreateView for CurrentPotViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::CurrentPotView;
        Box::new(CurrentPotView::new(self))
    }
}

impl CreateView for ProfileViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::ProfileView;
        Box::new(ProfileView::new(self))
    }
}

impl CreateView for LoginViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::LoginView;
        Box::new(LoginView::new(self))
    }
}

impl CreateView for LogoutViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::LogoutView;
        Box::new(LogoutView::new(self))
    }
}

impl CreateView for PictureUploadedViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::account::PictureUploadedView;
        Box::new(PictureUploadedView::new(self))
    }
}
