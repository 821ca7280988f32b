use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};

/// `1월 20일 오후 07:30`
pub fn format_departure<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    let meridiem = if time.hour() < 12 { "오전" } else { "오후" };
    let hour12 = match time.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!(
        "{}월 {}일 {} {:02}:{:02}",
        time.month(),
        time.day(),
        meridiem,
        hour12,
        time.minute()
    )
}

pub fn to_display(time: &DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    time.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_evening_time() {
        let utc = Utc.with_ymd_and_hms(2025, 1, 20, 10, 30, 0).unwrap();
        assert_eq!(format_departure(&to_display(&utc, kst())), "1월 20일 오후 07:30");
    }

    #[test]
    fn test_midnight_and_noon() {
        let midnight = kst().with_ymd_and_hms(2025, 3, 1, 0, 5, 0).unwrap();
        assert_eq!(format_departure(&midnight), "3월 1일 오전 12:05");
        let noon = kst().with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        assert_eq!(format_departure(&noon), "12월 31일 오후 12:00");
    }
}
