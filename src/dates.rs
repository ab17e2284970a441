/// Whole-day calendar helpers. Weeks begin on Sunday.
use chrono::{Datelike, Duration, Local, Months, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders the local calendar fields as `YYYY-MM-DD`.
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parses a strict `YYYY-MM-DD` string. Anything else is rejected so that
/// lexical and chronological order stay the same.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(next) => (next - month_start(date)).num_days() as u32,
        None => 31,
    }
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Duration::days(i64::from(days_in_month(date)) - 1)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Moves by whole calendar months, clamping the day to the target month's
/// length (Jan 31 + 1 month = Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let step = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(step)
    } else {
        date.checked_sub_months(step)
    };
    shifted.unwrap_or(date)
}

/// The local wall-clock date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDateTime, TimeZone, Weekday};

    fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("test date should parse")
    }

    #[test]
    fn format_date_ignores_time_of_day() {
        let morning = NaiveDateTime::parse_from_str("2024-06-10 00:00:01", "%Y-%m-%d %H:%M:%S")
            .expect("valid datetime");
        let night = NaiveDateTime::parse_from_str("2024-06-10 23:59:59", "%Y-%m-%d %H:%M:%S")
            .expect("valid datetime");
        assert_eq!(format_date(&morning), "2024-06-10");
        assert_eq!(format_date(&morning), format_date(&night));
    }

    #[test]
    fn format_date_uses_local_fields() {
        let late = Local
            .with_ymd_and_hms(2024, 12, 31, 23, 30, 0)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_date(&late), "2024-12-31");
    }

    #[test]
    fn parse_date_is_strict() {
        assert_eq!(parse_date("2024-06-10"), NaiveDate::from_ymd_opt(2024, 6, 10));
        assert!(parse_date("2024-6-10").is_none());
        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("+024-06-10").is_none());
    }

    #[test]
    fn is_same_day_compares_calendar_fields() {
        let a = date("2024-06-10");
        let b = NaiveDateTime::parse_from_str("2024-06-10 18:00:00", "%Y-%m-%d %H:%M:%S")
            .expect("valid datetime");
        assert!(is_same_day(&a, &b));
        assert!(!is_same_day(&a, &date("2024-07-10")));
        assert!(!is_same_day(&a, &date("2023-06-10")));
    }

    #[test]
    fn week_start_is_always_a_recent_sunday() {
        let mut day = date("2024-01-01");
        for _ in 0..400 {
            let start = week_start(day);
            assert_eq!(start.weekday(), Weekday::Sun);
            let distance = (day - start).num_days();
            assert!((0..=6).contains(&distance), "distance {distance} for {day}");
            day = add_days(day, 1);
        }
    }

    #[test]
    fn week_start_keeps_sundays() {
        assert_eq!(week_start(date("2024-06-09")), date("2024-06-09"));
        assert_eq!(week_start(date("2024-06-15")), date("2024-06-09"));
    }

    #[test]
    fn month_bounds() {
        assert_eq!(month_start(date("2024-02-17")), date("2024-02-01"));
        assert_eq!(month_end(date("2024-02-17")), date("2024-02-29"));
        assert_eq!(month_end(date("2023-02-03")), date("2023-02-28"));
        assert_eq!(month_end(date("2024-12-05")), date("2024-12-31"));
        assert_eq!(days_in_month(date("2024-04-30")), 30);
    }

    #[test]
    fn shift_months_clamps_day() {
        assert_eq!(shift_months(date("2024-01-31"), 1), date("2024-02-29"));
        assert_eq!(shift_months(date("2024-03-31"), -1), date("2024-02-29"));
        assert_eq!(shift_months(date("2024-12-15"), 1), date("2025-01-15"));
    }
}
