//! French display formatting for dates and amounts.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

const MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

const MONTHS_LONG: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Parses the backend's ISO dates: a local date-time, with or without
/// fractional seconds or offset, or a bare date.
fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn month(dt: &NaiveDateTime, names: &[&'static str; 12]) -> &'static str {
    names[dt.month0() as usize]
}

/// `15 janv. 2024`. Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse(value) {
        Some(dt) => format!("{} {} {}", dt.day(), month(&dt, &MONTHS_SHORT), dt.year()),
        None => value.to_string(),
    }
}

/// `15 janvier 2024`, or `-` when absent.
pub fn format_date_long(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => match parse(v) {
            Some(dt) => format!("{} {} {}", dt.day(), month(&dt, &MONTHS_LONG), dt.year()),
            None => v.to_string(),
        },
    }
}

/// `15 janvier 2024 à 10:30`, or `-` when absent.
pub fn format_date_time(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => match parse(v) {
            Some(dt) => format!(
                "{} {} {} à {:02}:{:02}",
                dt.day(),
                month(&dt, &MONTHS_LONG),
                dt.year(),
                dt.hour(),
                dt.minute()
            ),
            None => v.to_string(),
        },
    }
}

/// Whole FCFA with space-grouped thousands: `1 250 000 FCFA`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{} FCFA", sign, grouped)
}
