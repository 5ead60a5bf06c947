//! Fixed ru-RU date and time presentation.

use chrono::{Datelike, NaiveDateTime};

// Genitive month names, as used in "19 октября 2026 г."
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

/// 24-hour clock, `HH:MM`.
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Long-form date with a two-digit day.
pub fn format_date(at: NaiveDateTime) -> String {
    format!(
        "{:02} {} {} г.",
        at.day(),
        MONTHS[at.month0() as usize],
        at.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 30)
            .unwrap()
    }

    #[test]
    fn time_is_24_hour() {
        assert_eq!(format_time(at(2026, 10, 19, 21, 5)), "21:05");
        assert_eq!(format_time(at(2026, 10, 19, 0, 0)), "00:00");
    }

    #[test]
    fn date_uses_genitive_month() {
        assert_eq!(format_date(at(2026, 10, 19, 9, 0)), "19 октября 2026 г.");
        assert_eq!(format_date(at(2027, 3, 1, 9, 0)), "01 марта 2027 г.");
    }
}
