pub mod account;
pub mod common;
pub mod landmark;
pub mod result;
pub mod room;
pub mod shell;

use std::fmt;

pub use account::{
    CurrentPotViewModel, LoginViewModel, LogoutViewModel, PictureUploadedViewModel,
    PotViewModel, ProfileViewModel,
};
pub use common::{Guidance, OutputFormat, StatusBadge, StatusLevel, ViewMode};
pub use landmark::{LandmarkEntryViewModel, LandmarkListViewModel};
pub use result::CommandResultViewModel;
pub use room::{
    FilterViewModel, JoinResultViewModel, LeaveResultViewModel, RoomCardViewModel,
    RoomCreatedViewModel, RoomListViewModel,
};
pub use shell::{
    ChatPageViewModel, CreatePageViewModel, FormFieldViewModel, LoginPageViewModel,
    ModalViewModel, MyChatPageViewModel, MyPageViewModel, PageViewModel, SearchPageViewModel,
    ShellScreenViewModel, TabViewModel,
};

/// Bridge from a view model to its text view.
pub trait CreateView {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a>;
}
