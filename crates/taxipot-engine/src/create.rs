//! Room creation form.

use std::fmt;

use chrono::{DateTime, Utc};
use taxipot_types::{CreateRoomRequest, Landmark};

pub const MIN_PARTY: u32 = 2;
pub const MAX_PARTY: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Departure, destination or time left empty.
    MissingFields,
    UnknownLandmark(u32),
    PastDeparture,
    Capacity { min: u32, max: u32 },
    NegativeFee(i64),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingFields => write!(f, "모든 필드를 채워주세요."),
            FormError::UnknownLandmark(id) => write!(f, "알 수 없는 장소입니다: {}", id),
            FormError::PastDeparture => write!(f, "출발 시간은 현재 이후여야 합니다."),
            FormError::Capacity { min, max } => write!(
                f,
                "인원은 {}명 이상 {}명 이하여야 합니다 (최소 {}, 최대 {}).",
                MIN_PARTY, MAX_PARTY, min, max
            ),
            FormError::NegativeFee(fee) => write!(f, "예상 요금은 0 이상이어야 합니다: {}", fee),
        }
    }
}

impl std::error::Error for FormError {}

/// Editable state of the create page. Landmark ids use `0` for "not chosen".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoomForm {
    pub departure_id: u32,
    pub destination_id: u32,
    pub departure_time: Option<DateTime<Utc>>,
    pub estimated_fee: i64,
    min_capacity: u32,
    max_capacity: u32,
}

impl Default for CreateRoomForm {
    fn default() -> Self {
        Self {
            departure_id: 0,
            destination_id: 0,
            departure_time: None,
            estimated_fee: 0,
            min_capacity: MIN_PARTY,
            max_capacity: MAX_PARTY,
        }
    }
}

impl CreateRoomForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_capacity(&self) -> u32 {
        self.min_capacity
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Stepper for the minimum headcount. A step that would leave
    /// `[MIN_PARTY, MAX_PARTY]` is ignored.
    pub fn step_min(&mut self, delta: i32) -> u32 {
        self.min_capacity = step(self.min_capacity, delta);
        self.min_capacity
    }

    pub fn step_max(&mut self, delta: i32) -> u32 {
        self.max_capacity = step(self.max_capacity, delta);
        self.max_capacity
    }

    /// Set both bounds from free input (CLI flags); validated later.
    pub fn set_capacity(&mut self, min: u32, max: u32) {
        self.min_capacity = min;
        self.max_capacity = max;
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<CreateRoomRequest, FormError> {
        let Some(departure_time) = self.departure_time else {
            return Err(FormError::MissingFields);
        };
        if self.departure_id == 0 || self.destination_id == 0 {
            return Err(FormError::MissingFields);
        }
        for id in [self.departure_id, self.destination_id] {
            if Landmark::find(id).is_none() {
                return Err(FormError::UnknownLandmark(id));
            }
        }
        if departure_time < now {
            return Err(FormError::PastDeparture);
        }

        let (min, max) = (self.min_capacity, self.max_capacity);
        if min < MIN_PARTY || max > MAX_PARTY || min > max {
            return Err(FormError::Capacity { min, max });
        }

        let estimated_fee =
            u32::try_from(self.estimated_fee).map_err(|_| FormError::NegativeFee(self.estimated_fee))?;

        Ok(CreateRoomRequest {
            departure_id: self.departure_id,
            destination_id: self.destination_id,
            departure_time,
            min_capacity: min,
            max_capacity: max,
            estimated_fee,
        })
    }
}

fn step(value: u32, delta: i32) -> u32 {
    let next = value as i64 + delta as i64;
    if (MIN_PARTY as i64..=MAX_PARTY as i64).contains(&next) {
        next as u32
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 9, 0, 0).unwrap()
    }

    fn filled() -> CreateRoomForm {
        CreateRoomForm {
            departure_id: 1,
            destination_id: 3,
            departure_time: Some(now() + Duration::hours(2)),
            estimated_fee: 4800,
            ..CreateRoomForm::default()
        }
    }

    #[test]
    fn test_stepper_stays_in_range() {
        let mut form = CreateRoomForm::new();
        assert_eq!(form.step_min(-1), 2);
        assert_eq!(form.step_min(1), 3);
        assert_eq!(form.step_min(1), 4);
        assert_eq!(form.step_min(1), 4);
        assert_eq!(form.step_max(1), 4);
        assert_eq!(form.step_max(-3), 4);
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = filled().validate(now()).unwrap();
        assert_eq!(request.departure_id, 1);
        assert_eq!(request.min_capacity, 2);
        assert_eq!(request.max_capacity, 4);
        assert_eq!(request.estimated_fee, 4800);
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled();
        form.departure_time = None;
        assert_eq!(form.validate(now()), Err(FormError::MissingFields));

        let mut form = filled();
        form.destination_id = 0;
        assert_eq!(form.validate(now()), Err(FormError::MissingFields));
        assert_eq!(FormError::MissingFields.to_string(), "모든 필드를 채워주세요.");
    }

    #[test]
    fn test_rejects_unknown_landmark_and_past_time() {
        let mut form = filled();
        form.departure_id = 99;
        assert_eq!(form.validate(now()), Err(FormError::UnknownLandmark(99)));

        let mut form = filled();
        form.departure_time = Some(now() - Duration::minutes(1));
        assert_eq!(form.validate(now()), Err(FormError::PastDeparture));
    }

    #[test]
    fn test_capacity_bounds() {
        let mut form = filled();
        form.set_capacity(4, 3);
        assert_eq!(
            form.validate(now()),
            Err(FormError::Capacity { min: 4, max: 3 })
        );

        form.set_capacity(1, 4);
        assert!(form.validate(now()).is_err());
        form.set_capacity(2, 5);
        assert!(form.validate(now()).is_err());
        form.set_capacity(3, 3);
        assert!(form.validate(now()).is_ok());
    }

    #[test]
    fn test_negative_fee() {
        let mut form = filled();
        form.estimated_fee = -1;
        assert_eq!(form.validate(now()), Err(FormError::NegativeFee(-1)));
    }
}
