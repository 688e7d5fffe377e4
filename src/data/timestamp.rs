//! Tolerant timestamp parsing for the source's time column

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::constants::datetime::{DATE_FORMAT_LENGTH, MIN_TIMESTAMP_LENGTH, TIME_FORMAT_LENGTH};
use crate::error::{GwError, Result};

/// Formats carrying a time of day, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f", // 2024-01-15 14:30:00.123
    "%Y-%m-%d %H:%M:%S",    // 2024-01-15 14:30:00
    "%Y-%m-%d %H:%M",       // 2024-01-15 14:30
    "%Y-%m-%dT%H:%M:%S%.fZ", // 2024-01-15T14:30:00.123Z
    "%Y-%m-%dT%H:%M:%SZ",   // 2024-01-15T14:30:00Z
    "%Y-%m-%dT%H:%M:%S%.f", // 2024-01-15T14:30:00.123
    "%Y-%m-%dT%H:%M:%S",    // 2024-01-15T14:30:00
    "%Y-%m-%dT%H:%M",       // 2024-01-15T14:30
    "%Y/%m/%d %H:%M:%S",    // 2024/01/15 14:30:00
    "%Y/%m/%d %H:%M",       // 2024/01/15 14:30
    "%d/%m/%Y %H:%M:%S",    // 15/01/2024 14:30:00
    "%m/%d/%Y %H:%M:%S",    // 01/15/2024 14:30:00
    "%d-%m-%Y %H:%M:%S",    // 15-01-2024 14:30:00
    "%b %d, %Y %H:%M:%S",   // Jan 15, 2024 14:30:00
    "%d %b %Y %H:%M:%S",    // 15 Jan 2024 14:30:00
];

/// Date-only formats, read as midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",   // 2024-01-15
    "%Y/%m/%d",   // 2024/01/15
    "%d/%m/%Y",   // 15/01/2024
    "%m/%d/%Y",   // 01/15/2024
    "%d-%m-%Y",   // 15-01-2024
    "%b %d, %Y",  // Jan 15, 2024
    "%d %b %Y",   // 15 Jan 2024
];

/// Parse one timestamp cell.
///
/// Day-first formats are tried before month-first ones, so an ambiguous
/// `03/04/2024` reads as 3 April. Values with an explicit UTC offset keep
/// the wall-clock time of that offset.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(unparseable(raw));
    }

    if let Some(dt) = parse_compact(trimmed) {
        return Ok(dt);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }

    Err(unparseable(raw))
}

/// Compact `YYYYMMDD HHMMSS` form written by some loggers
fn parse_compact(trimmed: &str) -> Option<NaiveDateTime> {
    if trimmed.len() < MIN_TIMESTAMP_LENGTH
        || !trimmed.chars().all(|c| c.is_ascii_digit() || c.is_ascii_whitespace())
    {
        return None;
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.as_slice() {
        [date, time] if date.len() == DATE_FORMAT_LENGTH && time.len() == TIME_FORMAT_LENGTH => {
            let formatted = format!(
                "{}-{}-{} {}:{}:{}",
                &date[0..4], &date[4..6], &date[6..8],
                &time[0..2], &time[2..4], &time[4..6]
            );
            NaiveDateTime::parse_from_str(&formatted, "%Y-%m-%d %H:%M:%S").ok()
        }
        _ => None,
    }
}

fn unparseable(raw: &str) -> GwError {
    GwError::Parse {
        value: raw.to_string(),
        expected: "a timestamp",
    }
}

/// Parse one station cell; empty, non-numeric and non-finite cells are absent
pub fn parse_level(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
