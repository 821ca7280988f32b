use chrono::FixedOffset;
use taxipot_engine::Session;
use taxipot_types::{PotRecord, Room};

use crate::presentation::formatters::to_display;
use crate::presentation::view_models::{CurrentPotViewModel, PotViewModel, ProfileViewModel};

pub fn present_pot(record: &PotRecord, offset: FixedOffset) -> PotViewModel {
    let room = Room::from_record(record);
    PotViewModel {
        room_id: record.id,
        is_full: room.is_full(),
        departure: room.departure,
        destination: room.destination,
        departure_time: to_display(&record.departure_time, offset),
        host_name: room.host_name,
        current_count: record.current_count,
        min_capacity: record.min_capacity,
        max_capacity: record.max_capacity,
        estimated_fee: record.estimated_fee,
        status: record.status.as_str().to_string(),
    }
}

pub fn present_current_pot(record: Option<&PotRecord>, offset: FixedOffset) -> CurrentPotViewModel {
    CurrentPotViewModel {
        pot: record.map(|r| present_pot(r, offset)),
    }
}

pub fn present_profile(session: &Session) -> ProfileViewModel {
    ProfileViewModel {
        logged_in: session.logged_in,
        email: session.email.clone(),
        nickname: session.nickname.clone(),
        profile_image: session.profile_image.clone(),
    }
}
