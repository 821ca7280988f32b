use chrono::FixedOffset;
use taxipot_types::{CreateRoomRequest, Room, SearchFilter, landmark_name};

use crate::presentation::formatters::text::{ANY_DEPARTURE, ANY_DESTINATION};
use crate::presentation::formatters::to_display;
use crate::presentation::view_models::{
    FilterViewModel, JoinResultViewModel, RoomCardViewModel, RoomCreatedViewModel,
    RoomListViewModel,
};

pub fn present_room_card(room: &Room, offset: FixedOffset) -> RoomCardViewModel {
    RoomCardViewModel {
        room_id: room.room_id,
        departure: room.departure.clone(),
        destination: room.destination.clone(),
        departure_time: to_display(&room.departure_time, offset),
        host_name: room.host_name.clone(),
        current_capacity: room.current_capacity,
        max_capacity: room.max_capacity,
        is_full: room.is_full(),
    }
}

pub fn present_filter(filter: SearchFilter) -> FilterViewModel {
    let label = |id: Option<u32>, any: &str| match id {
        Some(id) => landmark_name(id).to_string(),
        None => any.to_string(),
    };
    FilterViewModel {
        departure_id: filter.departure.id(),
        departure: label(filter.departure.as_param(), ANY_DEPARTURE),
        destination_id: filter.destination.id(),
        destination: label(filter.destination.as_param(), ANY_DESTINATION),
    }
}

pub fn present_room_list(
    rooms: &[Room],
    filter: SearchFilter,
    page: u32,
    has_more: bool,
    offset: FixedOffset,
) -> RoomListViewModel {
    RoomListViewModel {
        filter: present_filter(filter),
        page,
        has_more,
        rooms: rooms.iter().map(|r| present_room_card(r, offset)).collect(),
    }
}

pub fn present_join_result(room_id: u32, chat_path: String) -> JoinResultViewModel {
    JoinResultViewModel { room_id, chat_path }
}

pub fn present_room_created(
    room_id: u32,
    request: &CreateRoomRequest,
    offset: FixedOffset,
) -> RoomCreatedViewModel {
    RoomCreatedViewModel {
        room_id,
        departure: landmark_name(request.departure_id).to_string(),
        destination: landmark_name(request.destination_id).to_string(),
        departure_time: to_display(&request.departure_time, offset),
        min_capacity: request.min_capacity,
        max_capacity: request.max_capacity,
        estimated_fee: request.estimated_fee,
        chat_path: format!("/chat/{}", room_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn room(current: u32, max: u32) -> Room {
        Room {
            room_id: 42,
            departure: "서울대입구역".to_string(),
            destination: "자연대".to_string(),
            departure_time: Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap(),
            current_capacity: current,
            max_capacity: max,
            host_name: "사용자 #7".to_string(),
        }
    }

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_full_room_is_marked_full() {
        assert!(present_room_card(&room(4, 4), kst()).is_full);
    }

    #[test]
    fn test_open_room_is_not_full() {
        assert!(!present_room_card(&room(3, 4), kst()).is_full);
    }

    #[test]
    fn test_time_is_shifted_to_display_offset() {
        let card = present_room_card(&room(1, 4), kst());
        assert_eq!(card.departure_time.to_rfc3339(), "2025-01-20T19:30:00+09:00");
    }

    #[test]
    fn test_filter_labels() {
        let vm = present_filter(SearchFilter::new(0, 3));
        assert_eq!(vm.departure, "출발지 전체");
        assert_eq!(vm.destination, "자연대");
        assert_eq!(vm.departure_id, 0);
    }
}
