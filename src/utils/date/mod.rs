// Date utility functions
// Wall-clock helpers shared by the grid, layout and recurrence code

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Formats accepted for timezone-naive wall-clock values.
const WALL_CLOCK_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Advance an end that falls at or before `start` onto the following day.
///
/// The result always lies after `start` and keeps the end's time of day,
/// so a 17:00 → 09:00 span becomes an overnight shift instead of a
/// zero or negative duration.
pub fn normalize_end(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
    if end > start {
        return end;
    }
    start
        .date()
        .succ_opt()
        .map_or(end, |next| next.and_time(end.time()))
}

/// Parse a timezone-naive wall-clock value.
///
/// A trailing `Z` is ignored: the engine treats every instant as local
/// wall-clock time. Returns `None` for anything unparsable.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Format a date the way audit notes reference it.
pub fn format_note_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde helper: a missing or unparsable wall-clock string becomes `None`
/// instead of rejecting the whole record.
pub fn deserialize_wall_clock<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_wall_clock))
}
