//! Sample server data.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, TimeZone, Utc};
use taxipot_types::{PotRecord, PotStatus, SearchPage};

/// 2025-01-20 19:30 KST.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Builder for [`PotRecord`]s with sensible defaults.
#[derive(Debug, Clone)]
pub struct PotBuilder {
    record: PotRecord,
}

impl PotBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            record: PotRecord {
                id,
                owner_id: 100 + id as u64,
                owner_name: None,
                departure_id: 1,
                destination_id: 3,
                departure_time: base_time() + Duration::minutes(id as i64),
                min_capacity: 2,
                max_capacity: 4,
                current_count: 1,
                estimated_fee: 4800,
                status: PotStatus::Recruiting,
            },
        }
    }

    pub fn route(mut self, departure_id: u32, destination_id: u32) -> Self {
        self.record.departure_id = departure_id;
        self.record.destination_id = destination_id;
        self
    }

    pub fn owner(mut self, owner_id: u64, owner_name: Option<&str>) -> Self {
        self.record.owner_id = owner_id;
        self.record.owner_name = owner_name.map(str::to_string);
        self
    }

    pub fn capacity(mut self, current: u32, max: u32) -> Self {
        self.record.current_count = current;
        self.record.max_capacity = max;
        if current >= max {
            self.record.status = PotStatus::Full;
        }
        self
    }

    pub fn departing_at(mut self, time: DateTime<Utc>) -> Self {
        self.record.departure_time = time;
        self
    }

    pub fn build(self) -> PotRecord {
        self.record
    }
}

pub fn pot(id: u32) -> PotRecord {
    PotBuilder::new(id).build()
}

/// Records for every id in `ids`, all on the same route.
pub fn pots(ids: impl IntoIterator<Item = u32>, departure_id: u32, destination_id: u32) -> Vec<PotRecord> {
    ids.into_iter()
        .map(|id| PotBuilder::new(id).route(departure_id, destination_id).build())
        .collect()
}

pub fn page(content: Vec<PotRecord>, last: Option<bool>) -> SearchPage {
    SearchPage { content, last }
}

/// Unsigned JWT whose payload carries `email`. Only the payload is ever
/// decoded client-side.
pub fn jwt_with_email(email: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = serde_json::json!({ "email": email, "sub": "1" }).to_string();
    let payload = URL_SAFE_NO_PAD.encode(payload.as_bytes());
    format!("{}.{}.sig", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_marks_full() {
        let record = PotBuilder::new(1).capacity(4, 4).build();
        assert_eq!(record.status, PotStatus::Full);
    }

    #[test]
    fn test_jwt_has_three_segments() {
        let token = jwt_with_email("kim@snu.ac.kr");
        assert_eq!(token.split('.').count(), 3);
    }
}
