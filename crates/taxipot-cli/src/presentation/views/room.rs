use std::fmt;

use crate::presentation::formatters::{format_departure, headcount, status_label, won};
use crate::presentation::view_models::{
    JoinResultViewModel, LeaveResultViewModel, RoomCardViewModel, RoomCreatedViewModel,
    RoomListViewModel, ViewMode,
};

pub const NO_ROOMS: &str = "조건에 맞는 방이 없습니다.";

// --------------------------------------------------------
// Room List View
// --------------------------------------------------------

pub struct RoomListView<'a> {
    data: &'a RoomListViewModel,
    mode: ViewMode,
}

impl<'a> RoomListView<'a> {
    pub fn new(data: &'a RoomListViewModel, mode: ViewMode) -> Self {
        Self { data, mode }
    }

    fn render_minimal(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for room in &self.data.rooms {
            writeln!(f, "{}", room.room_id)?;
        }
        Ok(())
    }

    fn render_compact(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for room in &self.data.rooms {
            writeln!(
                f,
                "#{:<5} {} → {}  {}  {}/{}  {}",
                room.room_id,
                room.departure,
                room.destination,
                format_departure(&room.departure_time),
                room.current_capacity,
                room.max_capacity,
                status_label(room.is_full),
            )?;
        }
        Ok(())
    }

    fn render_standard(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let filter = &self.data.filter;
        writeln!(f, "{} → {}", filter.departure, filter.destination)?;
        writeln!(f)?;

        if self.data.rooms.is_empty() {
            writeln!(f, "{}", NO_ROOMS)?;
            return Ok(());
        }

        for room in &self.data.rooms {
            write!(f, "{}", RoomCardView::new(room))?;
        }

        if self.data.has_more {
            writeln!(f, "… more on page {}", self.data.page + 1)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Display for RoomListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mode {
            ViewMode::Minimal => self.render_minimal(f),
            ViewMode::Compact => self.render_compact(f),
            ViewMode::Standard => self.render_standard(f),
        }
    }
}

/// Two-line card: route and status, then time, headcount and host.
pub struct RoomCardView<'a> {
    room: &'a RoomCardViewModel,
}

impl<'a> RoomCardView<'a> {
    pub fn new(room: &'a RoomCardViewModel) -> Self {
        Self { room }
    }
}

impl<'a> fmt::Display for RoomCardView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let room = self.room;
        writeln!(
            f,
            "[#{}] {} → {}  ({})",
            room.room_id,
            room.departure,
            room.destination,
            status_label(room.is_full)
        )?;
        writeln!(
            f,
            "      🕒 {}   {}   👑 {}",
            format_departure(&room.departure_time),
            headcount(room.current_capacity, room.max_capacity),
            room.host_name
        )?;
        writeln!(f)
    }
}

// --------------------------------------------------------
// Single-result Views
// --------------------------------------------------------

pub struct JoinResultView<'a> {
    data: &'a JoinResultViewModel,
}

impl<'a> JoinResultView<'a> {
    pub fn new(data: &'a JoinResultViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for JoinResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Joined room #{}", self.data.room_id)?;
        writeln!(f, "Chat: {}", self.data.chat_path)
    }
}

pub struct RoomCreatedView<'a> {
    data: &'a RoomCreatedViewModel,
}

impl<'a> RoomCreatedView<'a> {
    pub fn new(data: &'a RoomCreatedViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for RoomCreatedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = self.data;
        writeln!(f, "[#{}] {} → {}", d.room_id, d.departure, d.destination)?;
        writeln!(f, "  🕒 {}", format_departure(&d.departure_time))?;
        writeln!(f, "  👤 {}~{}명", d.min_capacity, d.max_capacity)?;
        writeln!(f, "  💰 {}", won(d.estimated_fee))?;
        writeln!(f, "Chat: {}", d.chat_path)
    }
}

pub struct LeaveResultView<'a> {
    data: &'a LeaveResultViewModel,
}

impl<'a> LeaveResultView<'a> {
    pub fn new(data: &'a LeaveResultViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for LeaveResultView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Left room #{}", self.data.room_id)
    }
}
