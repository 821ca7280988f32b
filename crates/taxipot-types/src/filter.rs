//! Search filter state.
//!
//! The service and the original UI encode "no constraint" as landmark id `0`.
//! Inside the client that sentinel is made explicit as [`LandmarkFilter::Any`];
//! `0` only exists at the edges (`from_id` / `id`), and `Any` becomes an
//! omitted query parameter at the HTTP boundary.

use serde::Serialize;

use crate::landmark::{LANDMARKS, Landmark};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum LandmarkFilter {
    #[default]
    Any,
    Only(u32),
}

impl LandmarkFilter {
    /// Interpret a raw id where `0` means "any".
    pub fn from_id(id: u32) -> Self {
        if id == 0 { Self::Any } else { Self::Only(id) }
    }

    /// Raw id with `0` for "any".
    pub fn id(self) -> u32 {
        match self {
            Self::Any => 0,
            Self::Only(id) => id,
        }
    }

    /// Value to send as a query parameter; `None` means omit it.
    pub fn as_param(self) -> Option<u32> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(id),
        }
    }

    /// Step forward through `Any, 1, 2, ..., 15, Any`.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Only(LANDMARKS[0].id),
            Self::Only(id) => match Landmark::position(id) {
                Some(pos) if pos + 1 < LANDMARKS.len() => Self::Only(LANDMARKS[pos + 1].id),
                _ => Self::Any,
            },
        }
    }

    /// Step backward through the same cycle as [`LandmarkFilter::next`].
    pub fn prev(self) -> Self {
        match self {
            Self::Any => Self::Only(LANDMARKS[LANDMARKS.len() - 1].id),
            Self::Only(id) => match Landmark::position(id) {
                Some(pos) if pos > 0 => Self::Only(LANDMARKS[pos - 1].id),
                _ => Self::Any,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SearchFilter {
    pub departure: LandmarkFilter,
    pub destination: LandmarkFilter,
}

impl SearchFilter {
    pub fn new(departure_id: u32, destination_id: u32) -> Self {
        Self {
            departure: LandmarkFilter::from_id(departure_id),
            destination: LandmarkFilter::from_id(destination_id),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.departure == LandmarkFilter::Any && self.destination == LandmarkFilter::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_any() {
        assert_eq!(LandmarkFilter::from_id(0), LandmarkFilter::Any);
        assert_eq!(LandmarkFilter::from_id(7), LandmarkFilter::Only(7));
        assert_eq!(LandmarkFilter::Any.as_param(), None);
        assert_eq!(LandmarkFilter::Only(3).as_param(), Some(3));
        assert_eq!(LandmarkFilter::Any.id(), 0);
    }

    #[test]
    fn test_cycle_wraps_through_any() {
        assert_eq!(LandmarkFilter::Any.next(), LandmarkFilter::Only(1));
        assert_eq!(LandmarkFilter::Only(15).next(), LandmarkFilter::Any);
        assert_eq!(LandmarkFilter::Any.prev(), LandmarkFilter::Only(15));
        assert_eq!(LandmarkFilter::Only(1).prev(), LandmarkFilter::Any);
        assert_eq!(LandmarkFilter::Only(99).next(), LandmarkFilter::Any);
    }

    #[test]
    fn test_same_departure_and_destination_allowed() {
        let filter = SearchFilter::new(4, 4);
        assert_eq!(filter.departure, filter.destination);
        assert!(!filter.is_unconstrained());
        assert!(SearchFilter::new(0, 0).is_unconstrained());
    }
}
