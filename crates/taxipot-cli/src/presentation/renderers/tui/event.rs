use std::ops::Range;
use std::path::PathBuf;

use crate::presentation::view_models::ShellScreenViewModel;

/// Handler → renderer.
#[derive(Debug)]
pub enum TuiEvent {
    Update(Box<ShellScreenViewModel>),
    /// Fatal error; shown until the user quits.
    Error(String),
    /// The shell is leaving; restore the terminal and return.
    Shutdown,
}

/// Renderer → handler: what the user asked for, already mapped from keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiIntent {
    Quit,
    /// `0`-based bottom-bar position.
    SwitchTab(usize),
    NextTab,
    Navigate(String),
    /// Login or logout depending on the session, from the header.
    AccountAction,
    /// Card rows currently on screen, the footer row included.
    Viewport(Range<usize>),
    CycleDeparture(i8),
    CycleDestination(i8),
    ClearFilter,
    SelectRoom(u32),
    Confirm,
    Dismiss,
    Retry,
    FocusField(i8),
    Adjust(i8),
    Submit,
    Refresh,
    Leave,
    OpenChat(u32),
    SaveNickname(String),
    UploadPicture(PathBuf),
}

/// Where the renderer delivers intents.
pub trait IntentSink: Send + 'static {
    /// `false` once the handler is gone.
    fn send_intent(&self, intent: UiIntent) -> bool;
}
