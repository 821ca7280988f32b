//! Create page editing: which field has focus and how arrow keys change it.

use chrono::{DateTime, Duration, DurationRound, Utc};
use taxipot_engine::CreateRoomForm;
use taxipot_types::LandmarkFilter;

/// Minutes per arrow press on the departure time.
pub const TIME_STEP_MINUTES: i64 = 10;
/// Won per arrow press on the fare.
pub const FEE_STEP: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Departure,
    Destination,
    DepartureTime,
    MinCapacity,
    MaxCapacity,
    EstimatedFee,
}

impl CreateField {
    pub const ALL: [CreateField; 6] = [
        CreateField::Departure,
        CreateField::Destination,
        CreateField::DepartureTime,
        CreateField::MinCapacity,
        CreateField::MaxCapacity,
        CreateField::EstimatedFee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CreateField::Departure => "출발지",
            CreateField::Destination => "도착지",
            CreateField::DepartureTime => "출발 시간",
            CreateField::MinCapacity => "최소 인원",
            CreateField::MaxCapacity => "최대 인원",
            CreateField::EstimatedFee => "예상 요금",
        }
    }
}

#[derive(Debug, Default)]
pub struct CreatePage {
    pub form: CreateRoomForm,
    pub focused: usize,
    pub submitting: bool,
}

impl CreatePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self) -> CreateField {
        CreateField::ALL[self.focused % CreateField::ALL.len()]
    }

    pub fn focus(&mut self, delta: i8) {
        let len = CreateField::ALL.len() as isize;
        let next = (self.focused as isize + delta as isize).rem_euclid(len);
        self.focused = next as usize;
    }

    /// Apply one arrow press to the focused field.
    pub fn adjust(&mut self, delta: i8, now: DateTime<Utc>) {
        let field = self.field();
        let form = &mut self.form;
        match field {
            CreateField::Departure => form.departure_id = cycle(form.departure_id, delta),
            CreateField::Destination => form.destination_id = cycle(form.destination_id, delta),
            CreateField::DepartureTime => {
                form.departure_time = Some(match form.departure_time {
                    None => first_slot(now),
                    Some(t) => t + Duration::minutes(TIME_STEP_MINUTES * delta as i64),
                });
            }
            CreateField::MinCapacity => {
                form.step_min(delta as i32);
            }
            CreateField::MaxCapacity => {
                form.step_max(delta as i32);
            }
            CreateField::EstimatedFee => {
                form.estimated_fee = (form.estimated_fee + FEE_STEP * delta as i64).max(0);
            }
        }
    }
}

fn cycle(id: u32, delta: i8) -> u32 {
    let filter = LandmarkFilter::from_id(id);
    let stepped = if delta >= 0 { filter.next() } else { filter.prev() };
    stepped.id()
}

/// First selectable departure: the next whole step at least one step ahead.
fn first_slot(now: DateTime<Utc>) -> DateTime<Utc> {
    let step = Duration::minutes(TIME_STEP_MINUTES);
    let ahead = now + step;
    ahead.duration_trunc(step).map(|t| t + step).unwrap_or(ahead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 10, 33, 12).unwrap()
    }

    #[test]
    fn test_focus_wraps() {
        let mut page = CreatePage::new();
        page.focus(-1);
        assert_eq!(page.field(), CreateField::EstimatedFee);
        page.focus(1);
        assert_eq!(page.field(), CreateField::Departure);
    }

    #[test]
    fn test_landmark_cycles_through_any() {
        let mut page = CreatePage::new();
        page.adjust(1, now());
        assert_eq!(page.form.departure_id, 1);
        page.adjust(-1, now());
        page.adjust(-1, now());
        assert_eq!(page.form.departure_id, 15);
    }

    #[test]
    fn test_adjust_targets_focused_field() {
        let mut page = CreatePage::new();
        page.focus(1);
        page.adjust(1, now());
        page.adjust(1, now());
        assert_eq!(page.form.departure_id, 0);
        assert_eq!(page.form.destination_id, 2);
    }

    #[test]
    fn test_time_starts_at_next_slot() {
        let mut page = CreatePage::new();
        page.focused = 2;
        page.adjust(1, now());
        assert_eq!(
            page.form.departure_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 10, 50, 0).unwrap())
        );
        page.adjust(-1, now());
        assert_eq!(
            page.form.departure_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 10, 40, 0).unwrap())
        );
    }

    #[test]
    fn test_capacity_stepper_stays_in_bounds() {
        let mut page = CreatePage::new();
        page.focused = 3;
        page.adjust(-1, now());
        assert_eq!(page.form.min_capacity(), 2);
        page.adjust(1, now());
        assert_eq!(page.form.min_capacity(), 3);
        page.focused = 4;
        page.adjust(1, now());
        assert_eq!(page.form.max_capacity(), 4);
    }

    #[test]
    fn test_fee_never_goes_negative() {
        let mut page = CreatePage::new();
        page.focused = 5;
        page.adjust(-1, now());
        assert_eq!(page.form.estimated_fee, 0);
        page.adjust(1, now());
        page.adjust(1, now());
        assert_eq!(page.form.estimated_fee, 1000);
    }
}
