//! Flexible date-time parsing for the `Start Time` / `End Time` columns
//!
//! Exports are written by hand-edited spreadsheets as often as by the service
//! itself, so no single format can be assumed. Text that carries an offset keeps
//! it; text without one is placed in the caller's default offset. Nothing is
//! ever converted between offsets.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

/// Formats carrying an explicit offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M %z",
    "%Y/%m/%d %H:%M:%S%.f %z",
    "%m/%d/%Y %H:%M:%S %z",
    "%m/%d/%Y %I:%M:%S %p %z",
    "%m/%d/%Y %I:%M %p %z",
    "%b %d, %Y %I:%M:%S %p %z",
    "%b %d, %Y %I:%M %p %z",
    "%b %d, %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
];

/// Wall-clock formats without an offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %I:%M %p",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

/// Date-only formats, stamped at midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%d %b %Y"];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const MONTHS: &[(&str, &str)] = &[
    ("january", "Jan"),
    ("february", "Feb"),
    ("march", "Mar"),
    ("april", "Apr"),
    ("june", "Jun"),
    ("july", "Jul"),
    ("august", "Aug"),
    ("september", "Sep"),
    ("october", "Oct"),
    ("november", "Nov"),
    ("december", "Dec"),
];

/// Parse free-form date-time text.
///
/// Returns `None` when no supported form matches.
pub fn parse_flexible_datetime(
    text: &str,
    default_offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt);
    }

    let normalized = normalize(trimmed);

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return default_offset.from_local_datetime(&naive).single();
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, format) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return default_offset.from_local_datetime(&naive).single();
        }
    }

    None
}

/// Rewrite human-written text into something the format tables accept.
///
/// Collapses whitespace, drops a leading weekday and a joining "at", shortens
/// full month names, drops the comma after a year, spells UTC markers as
/// `+0000` and widens a trailing `+HH` offset to `+HH00`.
fn normalize(text: &str) -> String {
    let mut words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| !w.eq_ignore_ascii_case("at"))
        .collect();
    if words.len() > 1 && is_weekday(words[0].trim_end_matches(',')) {
        words.remove(0);
    }

    let words: Vec<String> = words.into_iter().map(normalize_word).collect();
    let mut joined = words.join(" ");

    for marker in [" UTC", " GMT", " utc", " gmt"] {
        if let Some(stripped) = joined.strip_suffix(marker) {
            return format!("{stripped} +0000");
        }
    }

    // Trailing Zulu marker directly after the seconds, e.g. "2024-01-01 10:00:00Z"
    if let Some(stripped) = joined.strip_suffix(['Z', 'z']) {
        if stripped.ends_with(|c: char| c.is_ascii_digit()) {
            return format!("{stripped} +0000");
        }
    }

    if has_short_offset(&joined) {
        joined.push_str("00");
    }

    joined
}

fn is_weekday(word: &str) -> bool {
    let word = word.to_ascii_lowercase();
    WEEKDAYS
        .iter()
        .any(|day| *day == word || (word.len() == 3 && day.starts_with(&word)))
}

fn normalize_word(word: &str) -> String {
    let (bare, comma) = match word.strip_suffix(',') {
        Some(bare) => (bare, ","),
        None => (word, ""),
    };

    if bare.len() == 4 && bare.bytes().all(|b| b.is_ascii_digit()) {
        return bare.to_string();
    }

    let lower = bare.to_ascii_lowercase();
    match MONTHS.iter().find(|(full, _)| *full == lower) {
        Some((_, short)) => format!("{short}{comma}"),
        None => word.to_string(),
    }
}

/// True for text ending in a time followed by a bare `+HH` / `-HH`
fn has_short_offset(text: &str) -> bool {
    if !text.contains(':') {
        return false;
    }
    let bytes = text.as_bytes();
    let n = bytes.len();
    if n < 4 {
        return false;
    }
    matches!(bytes[n - 3], b'+' | b'-')
        && bytes[n - 2].is_ascii_digit()
        && bytes[n - 1].is_ascii_digit()
        && (bytes[n - 4].is_ascii_digit() || bytes[n - 4] == b' ')
}

/// Parse an offset such as `+02:00`, `-0530`, `+3`, `Z` or `UTC`
pub fn parse_utc_offset(text: &str) -> Option<FixedOffset> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("z") || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match text.chars().next()? {
        '+' => (1, &text[1..]),
        '-' => (-1, &text[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.bytes().all(|b| b.is_ascii_digit()) => {
            rest.split_at(2)
        }
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
