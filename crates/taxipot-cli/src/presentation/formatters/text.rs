pub const STATUS_FULL: &str = "모집완료";
pub const STATUS_OPEN: &str = "모집중";
pub const ANY_DEPARTURE: &str = "출발지 전체";
pub const ANY_DESTINATION: &str = "도착지 전체";

pub fn status_label(is_full: bool) -> &'static str {
    if is_full { STATUS_FULL } else { STATUS_OPEN }
}

/// `👤 3 / 4`
pub fn headcount(current: u32, max: u32) -> String {
    format!("👤 {} / {}", current, max)
}

/// `4,800원`
pub fn won(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push('원');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headcount() {
        assert_eq!(headcount(3, 4), "👤 3 / 4");
    }

    #[test]
    fn test_won_groups_thousands() {
        assert_eq!(won(0), "0원");
        assert_eq!(won(800), "800원");
        assert_eq!(won(4800), "4,800원");
        assert_eq!(won(1234567), "1,234,567원");
    }
}
