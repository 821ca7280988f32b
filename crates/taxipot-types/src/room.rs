use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::landmark::landmark_name;
use crate::pot::PotRecord;

/// Search-result projection of a [`PotRecord`].
///
/// `current_capacity <= max_capacity` is the server's invariant; nothing here
/// enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub room_id: u32,
    pub departure: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub current_capacity: u32,
    pub max_capacity: u32,
    pub host_name: String,
}

impl Room {
    pub fn from_record(record: &PotRecord) -> Self {
        Self {
            room_id: record.id,
            departure: landmark_name(record.departure_id).to_string(),
            destination: landmark_name(record.destination_id).to_string(),
            departure_time: record.departure_time,
            current_capacity: record.current_count,
            max_capacity: record.max_capacity,
            host_name: host_label(record),
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_capacity >= self.max_capacity
    }
}

impl From<&PotRecord> for Room {
    fn from(record: &PotRecord) -> Self {
        Self::from_record(record)
    }
}

fn host_label(record: &PotRecord) -> String {
    match record.owner_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("사용자 #{}", record.owner_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::UNKNOWN_LANDMARK;
    use crate::pot::PotStatus;
    use chrono::TimeZone;

    fn record(departure_id: u32, destination_id: u32) -> PotRecord {
        PotRecord {
            id: 5,
            owner_id: 11,
            owner_name: None,
            departure_id,
            destination_id,
            departure_time: Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap(),
            min_capacity: 2,
            max_capacity: 4,
            current_count: 4,
            estimated_fee: 5000,
            status: PotStatus::Full,
        }
    }

    #[test]
    fn test_projection_resolves_landmarks() {
        let room = Room::from_record(&record(1, 3));
        assert_eq!(room.room_id, 5);
        assert_eq!(room.departure, "서울대입구역");
        assert_eq!(room.destination, "자연대");
        assert_eq!(room.current_capacity, 4);
        assert_eq!(room.host_name, "사용자 #11");
        assert!(room.is_full());
    }

    #[test]
    fn test_unknown_landmark_does_not_fail() {
        let room = Room::from_record(&record(0, 77));
        assert_eq!(room.departure, UNKNOWN_LANDMARK);
        assert_eq!(room.destination, UNKNOWN_LANDMARK);
    }

    #[test]
    fn test_owner_name_wins_when_present() {
        let mut rec = record(1, 2);
        rec.owner_name = Some("관악러".to_string());
        assert_eq!(Room::from(&rec).host_name, "관악러");

        rec.owner_name = Some("  ".to_string());
        assert_eq!(Room::from(&rec).host_name, "사용자 #11");
    }
}
