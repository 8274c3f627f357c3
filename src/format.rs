//! Display formatting for amounts and record timestamps.
//!
//! The service stores timestamps as `YYYY-MM-DD HH:MM:SS` strings; the UI
//! shows them in the product's fixed display locale. Both formatters are
//! pure: same input, same output, no mutation of the source record.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Month names in the genitive case, as the display locale requires
const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Formats a stored `2019-03-10 03:20:41` timestamp as
/// `10 марта 2019 г. в 03:20`. A timestamp that does not parse is shown
/// as-is rather than dropped.
pub fn format_date(raw: &str) -> String {
    let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") else {
        return raw.to_string();
    };
    let month = MONTHS[dt.month0() as usize];
    format!(
        "{} {} {} г. в {:02}:{:02}",
        dt.day(),
        month,
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}

/// Formats an amount for a row: whole sums lose the fractional part,
/// anything else prints the shortest exact representation.
pub fn format_sum(sum: f64) -> String {
    if sum.fract() == 0.0 && sum.abs() < 1e15 {
        format!("{}", sum as i64)
    } else {
        format!("{}", sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_reference_case() {
        assert_eq!(
            format_date("2019-03-10 03:20:41"),
            "10 марта 2019 г. в 03:20"
        );
    }

    #[test]
    fn test_format_date_is_pure() {
        let raw = "2021-12-01 18:05:00";
        let first = format_date(raw);
        let second = format_date(raw);
        assert_eq!(first, second);
        assert_eq!(first, "1 декабря 2021 г. в 18:05");
    }

    #[test]
    fn test_format_date_passes_through_unparseable_input() {
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_sum() {
        assert_eq!(format_sum(200.0), "200");
        assert_eq!(format_sum(15.5), "15.5");
        assert_eq!(format_sum(0.0), "0");
        assert_eq!(format_sum(-42.0), "-42");
    }
}
