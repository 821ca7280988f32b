use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

// --------------------------------------------------------
// Data Definitions (ViewModels)
// --------------------------------------------------------

/// One search result as shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCardViewModel {
    pub room_id: u32,
    pub departure: String,
    pub destination: String,
    /// Already shifted to the display offset.
    pub departure_time: DateTime<FixedOffset>,
    pub host_name: String,
    pub current_capacity: u32,
    pub max_capacity: u32,
    pub is_full: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterViewModel {
    pub departure_id: u32,
    pub departure: String,
    pub destination_id: u32,
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub struct RoomListViewModel {
    pub filter: FilterViewModel,
    /// Last page included in `rooms`.
    pub page: u32,
    pub has_more: bool,
    pub rooms: Vec<RoomCardViewModel>,
}

#[derive(Debug, Serialize)]
pub struct JoinResultViewModel {
    pub room_id: u32,
    pub chat_path: String,
}

#[derive(Debug, Serialize)]
pub struct RoomCreatedViewModel {
    pub room_id: u32,
    pub departure: String,
    pub destination: String,
    pub departure_time: DateTime<FixedOffset>,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub estimated_fee: u32,
    pub chat_path: String,
}

#[derive(Debug, Serialize)]
pub struct LeaveResultViewModel {
    pub room_id: u32,
}

// --------------------------------------------------------
// CreateView Trait Implementations (Bridge to Views)
// --------------------------------------------------------

impl CreateView for RoomListViewModel {
    fn create_view<'a>(&'a self, mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::room::RoomListView;
        Box::new(RoomListView::new(self, mode))
    }
}

impl CreateView for JoinResultViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::room::JoinResultView;
        Box::new(JoinResultView::new(self))
    }
}

impl CreateView for RoomCreatedViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::room::RoomCreatedView;
        Box::new(RoomCreatedView::new(self))
    }
}

impl CreateView for LeaveResultViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::room::LeaveResultView;
        Box::new(LeaveResultView::new(self))
    }
}
