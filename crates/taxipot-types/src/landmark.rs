//! Fixed pickup/dropoff locations.
//!
//! The service identifies locations by small integer ids. The table is
//! compiled in and never changes at runtime; it is only used to turn ids
//! coming from the server into display names.

use serde::Serialize;

/// Display name used when an id has no entry in [`LANDMARKS`].
pub const UNKNOWN_LANDMARK: &str = "알 수 없음";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub id: u32,
    pub name: &'static str,
}

pub const LANDMARKS: [Landmark; 15] = [
    Landmark { id: 1, name: "서울대입구역" },
    Landmark { id: 2, name: "낙성대역" },
    Landmark { id: 3, name: "자연대" },
    Landmark { id: 4, name: "행정관" },
    // names for 5..=15 are provisional until the server publishes its list
    Landmark { id: 5, name: "서울대 정문" },
    Landmark { id: 6, name: "신림역" },
    Landmark { id: 7, name: "봉천역" },
    Landmark { id: 8, name: "사당역" },
    Landmark { id: 9, name: "공대 입구" },
    Landmark { id: 10, name: "기숙사 삼거리" },
    Landmark { id: 11, name: "학생회관" },
    Landmark { id: 12, name: "중앙도서관" },
    Landmark { id: 13, name: "경영대" },
    Landmark { id: 14, name: "301동" },
    Landmark { id: 15, name: "관악산 입구" },
];

impl Landmark {
    pub fn find(id: u32) -> Option<&'static Landmark> {
        LANDMARKS.iter().find(|l| l.id == id)
    }

    /// Position of `id` in the table, used by pickers that cycle through it.
    pub fn position(id: u32) -> Option<usize> {
        LANDMARKS.iter().position(|l| l.id == id)
    }
}

/// Resolve an id to its display name, falling back to [`UNKNOWN_LANDMARK`].
pub fn landmark_name(id: u32) -> &'static str {
    Landmark::find(id).map_or(UNKNOWN_LANDMARK, |l| l.name)
}
