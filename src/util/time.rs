// src/util/time.rs

//! Timestamp parsing and the "from now" phrases shown in the time column.
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const INVALID_DATE: &str = "Invalid date";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the sender's timestamp. Offsets are honoured, naive values are
/// taken as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// True when `format` is a strftime pattern chrono can render without panicking.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Renders the time column: the configured pattern when there is one,
/// otherwise a relative phrase.
pub fn describe_timestamp(raw: &str, format: Option<&str>, now: DateTime<Local>) -> String {
    let Some(then) = parse_timestamp(raw) else {
        return INVALID_DATE.to_string();
    };

    match format {
        Some(format) if is_valid_format(format) => then.format(format).to_string(),
        Some(_) => INVALID_DATE.to_string(),
        None => from_now(then, now),
    }
}

/// Relative phrase between `then` and `now`, e.g. "5 minutes ago" or "in an hour".
pub fn from_now(then: DateTime<Local>, now: DateTime<Local>) -> String {
    let delta = then.signed_duration_since(now).num_milliseconds();
    let phrase = humanize((delta.abs() as f64) / 1000.0);

    if delta > 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn humanize(seconds: f64) -> String {
    let secs = seconds.round();
    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3600.0).round();
    let days = (seconds / 86_400.0).round();
    // average Gregorian month
    let months = (seconds / 86_400.0 * 4800.0 / 146_097.0).round();
    let years = (seconds / 86_400.0 * 400.0 / 146_097.0).round();

    if secs < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes)
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours)
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days)
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{} months", months)
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}
