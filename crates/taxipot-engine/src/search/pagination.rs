use std::collections::HashSet;

use taxipot_types::Room;

/// Accumulated results for one filter session.
///
/// `rooms` is append-only until the next reset and never holds two entries
/// with the same `room_id`.
#[derive(Debug)]
pub(crate) struct Pagination {
    pub page: u32,
    pub rooms: Vec<Room>,
    pub has_more: bool,
    pub loading: bool,
    pub failed: Option<FailedFetch>,
    seen: HashSet<u32>,
}

/// The page request that last failed, kept so the user can retry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFetch {
    pub page: u32,
    pub is_new_search: bool,
    pub message: String,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            rooms: Vec::new(),
            has_more: true,
            loading: false,
            failed: None,
            seen: HashSet::new(),
        }
    }
}

impl Pagination {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the list with `rooms`, dropping duplicates within the page.
    pub fn replace(&mut self, rooms: Vec<Room>) -> usize {
        self.rooms.clear();
        self.seen.clear();
        self.append(rooms)
    }

    /// Append rooms not seen before, keeping arrival order. Returns how many
    /// were added.
    pub fn append(&mut self, rooms: Vec<Room>) -> usize {
        let before = self.rooms.len();
        for room in rooms {
            if self.seen.insert(room.room_id) {
                self.rooms.push(room);
            }
        }
        self.rooms.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn room(id: u32) -> Room {
        Room {
            room_id: id,
            departure: "서울대입구역".to_string(),
            destination: "행정관".to_string(),
            departure_time: Utc.with_ymd_and_hms(2025, 1, 20, 10, 0, 0).unwrap(),
            current_capacity: 1,
            max_capacity: 4,
            host_name: "host".to_string(),
        }
    }

    #[test]
    fn test_append_skips_seen_ids() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.append(vec![room(1), room(2)]), 2);
        assert_eq!(pagination.append(vec![room(2), room(3), room(3)]), 1);
        let ids: Vec<u32> = pagination.rooms.iter().map(|r| r.room_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_replace_forgets_previous_ids() {
        let mut pagination = Pagination::default();
        pagination.append(vec![room(1), room(2)]);
        assert_eq!(pagination.replace(vec![room(2), room(2), room(9)]), 2);
        let ids: Vec<u32> = pagination.rooms.iter().map(|r| r.room_id).collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut pagination = Pagination::default();
        pagination.append(vec![room(1)]);
        pagination.page = 3;
        pagination.has_more = false;
        pagination.loading = true;
        pagination.reset();
        assert_eq!(pagination.page, 0);
        assert!(pagination.rooms.is_empty());
        assert!(pagination.has_more);
        assert!(!pagination.loading);
        assert_eq!(pagination.append(vec![room(1)]), 1);
    }
}
