use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Parses a strict `YYYY-MM-DD` calendar date with a year in 1900..=2100.
///
/// Returns `None` for anything that does not match the pattern exactly or
/// that names a day the month does not have.
pub fn validate(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(idx, b)| idx == 4 || idx == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[5..7].parse().ok()?;
    let day: u32 = text[8..10].parse().ok()?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    // round-trip
    if date.year() != year || date.month() != month || date.day() != day {
        return None;
    }
    Some(date)
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// True when `end` begins after `now`, i.e. the date lies in the future.
pub fn is_future(end: NaiveDate, now: DateTime<Utc>) -> bool {
    start_of_day(end) > now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_dates() {
        assert_eq!(validate("2024-01-31"), NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(validate("1900-01-01"), NaiveDate::from_ymd_opt(1900, 1, 1));
        assert_eq!(validate("2100-12-31"), NaiveDate::from_ymd_opt(2100, 12, 31));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "", "2024-1-01", "2024/01/01", "24-01-01", "2024-01-011", " 2024-01-01",
            "2024-0a-01", "abcd-ef-gh", "2024-01-01T00:00", "+202-01-01", "２０２４-01-01",
        ] {
            assert!(validate(text).is_none(), "accepted {text:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_years_and_fields() {
        for text in ["1899-12-31", "2101-01-01", "2024-00-10", "2024-13-01", "2024-01-00", "2024-01-32"] {
            assert!(validate(text).is_none(), "accepted {text:?}");
        }
    }

    #[test]
    fn checks_month_lengths_and_leap_years() {
        assert!(validate("2024-02-29").is_some());
        assert!(validate("2023-02-29").is_none());
        assert!(validate("2023-02-30").is_none());
        assert!(validate("2024-04-31").is_none());
        assert!(validate("2000-02-29").is_some());
        assert!(validate("1900-02-29").is_none());
    }

    #[test]
    fn future_is_relative_to_midnight_utc() {
        let now = start_of_day(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            + chrono::Duration::hours(9);
        assert!(!is_future(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), now));
        assert!(!is_future(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), now));
        assert!(is_future(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(), now));
    }
}
