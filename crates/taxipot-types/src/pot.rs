use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::service_time;

/// Lifecycle state of a pot as reported by the server.
///
/// Unknown values are preserved so that a newer server does not break
/// decoding of whole search pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PotStatus {
    #[default]
    Recruiting,
    Full,
    Departed,
    Closed,
    Other(String),
}

impl From<String> for PotStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "RECRUITING" => Self::Recruiting,
            "FULL" => Self::Full,
            "DEPARTED" => Self::Departed,
            "CLOSED" => Self::Closed,
            _ => Self::Other(raw),
        }
    }
}

impl From<PotStatus> for String {
    fn from(status: PotStatus) -> Self {
        status.as_str().to_string()
    }
}

impl PotStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Recruiting => "RECRUITING",
            Self::Full => "FULL",
            Self::Departed => "DEPARTED",
            Self::Closed => "CLOSED",
            Self::Other(raw) => raw,
        }
    }
}

/// Room record as returned by the server (`/rooms/search`, `/users/me/pot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PotRecord {
    pub id: u32,
    #[serde(default)]
    pub owner_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub departure_id: u32,
    #[serde(default)]
    pub destination_id: u32,
    #[serde(with = "service_time")]
    pub departure_time: DateTime<Utc>,
    #[serde(default)]
    pub min_capacity: u32,
    #[serde(default)]
    pub max_capacity: u32,
    #[serde(default)]
    pub current_count: u32,
    #[serde(default)]
    pub estimated_fee: u32,
    #[serde(default)]
    pub status: PotStatus,
}

/// One page of `/rooms/search`.
///
/// `last` is optional on the wire; callers fall back to "an empty page is the
/// last page" when it is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub content: Vec<PotRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
}

/// Body of `POST /room`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub departure_id: u32,
    pub destination_id: u32,
    #[serde(with = "service_time")]
    pub departure_time: DateTime<Utc>,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub estimated_fee: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreated {
    pub created_pot_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_server_record() {
        let json = r#"{
            "id": 42,
            "ownerId": 7,
            "departureId": 1,
            "destinationId": 3,
            "departureTime": "2025-01-20T19:30:00",
            "minCapacity": 2,
            "maxCapacity": 4,
            "currentCount": 3,
            "estimatedFee": 4800,
            "status": "RECRUITING"
        }"#;

        let record: PotRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 42);
        assert_eq!(record.owner_name, None);
        assert_eq!(record.current_count, 3);
        assert_eq!(record.status, PotStatus::Recruiting);
        assert_eq!(
            record.departure_time,
            Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: PotStatus = serde_json::from_str(r#""MATCHING""#).unwrap();
        assert_eq!(status, PotStatus::Other("MATCHING".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""MATCHING""#);
    }

    #[test]
    fn test_page_without_last_flag() {
        let page: SearchPage = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.last, None);
    }

    #[test]
    fn test_create_request_wire_shape() {
        let request = CreateRoomRequest {
            departure_id: 1,
            destination_id: 4,
            departure_time: Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap(),
            min_capacity: 2,
            max_capacity: 4,
            estimated_fee: 6000,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["departureId"], 1);
        assert_eq!(value["departureTime"], "2025-03-02T09:00:00");
        assert_eq!(value["estimatedFee"], 6000);
    }
}
