//! Minute-of-day arithmetic.
//!
//! Times of day are plain minute counts from midnight (`0..1440`). An interval
//! end may be `1440` to mean midnight at the end of the day.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Granularity used when rounding picker input.
pub const QUARTER_HOUR: u32 = 15;

/// Parse strict 24-hour `H:MM` or `HH:MM` text into a minute of day.
///
/// Returns `None` for any other shape: AM/PM suffixes, seconds, single-digit
/// minutes, surrounding whitespace, or out-of-range fields.
///
/// ```
/// use slot_engine::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("9:05"), Some(545));
/// assert_eq!(parse_time_of_day("25:00"), None);
/// assert_eq!(parse_time_of_day("9:5"), None);
/// ```
pub fn parse_time_of_day(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.split_once(':')?;

    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

/// Format a minute count as zero-padded `HH:MM`.
///
/// The input is normalized modulo one day first, so negative and overflowing
/// values wrap around midnight (`-30` formats as `"23:30"`).
pub fn minutes_to_hhmm(minutes: i64) -> String {
    let normalized = minutes.rem_euclid(MINUTES_PER_DAY as i64);
    format!("{:02}:{:02}", normalized / 60, normalized % 60)
}

/// Round up to the next quarter hour, wrapping at midnight.
///
/// The result always advances: a value already on a quarter boundary moves to
/// the following quarter (`60` becomes `75`). Inputs past one day are
/// normalized first, so any `u32` is accepted.
pub fn round_up_to_quarter(minutes: u32) -> u32 {
    let minutes = minutes % MINUTES_PER_DAY;
    let next = (minutes / QUARTER_HOUR + 1) * QUARTER_HOUR;
    next % MINUTES_PER_DAY
}

/// Weekday index of a date with Sunday as `0`, Monday as `1` through Saturday
/// as `6`.
///
/// This is the numbering the booking client stores in weekly rules.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// A time-of-day value in one of the representations the backend sends.
///
/// Each variant has exactly one conversion to a minute of day; there is no
/// probing of the value's runtime shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Minutes since midnight; `1440` is accepted as end-of-day.
    Minutes(i64),
    /// A full timestamp whose time-of-day part is used.
    DateTime(NaiveDateTime),
    /// `HH:MM` text, or `HH:MM:SS` as returned by SQL `time` columns.
    Text(String),
}

impl TimeValue {
    /// Convert to a minute of day, or `None` when the value is malformed.
    pub fn to_minute_of_day(&self) -> Option<u32> {
        match self {
            TimeValue::Minutes(m) => {
                if (0..=MINUTES_PER_DAY as i64).contains(m) {
                    Some(*m as u32)
                } else {
                    None
                }
            }
            TimeValue::DateTime(dt) => Some(dt.hour() * 60 + dt.minute()),
            TimeValue::Text(text) => parse_time_with_optional_seconds(text),
        }
    }
}

impl From<u32> for TimeValue {
    fn from(minutes: u32) -> Self {
        TimeValue::Minutes(minutes as i64)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        TimeValue::Text(text.to_string())
    }
}

/// `HH:MM` or `HH:MM:SS`; seconds are validated and then truncated.
fn parse_time_with_optional_seconds(text: &str) -> Option<u32> {
    if let Some(minutes) = parse_time_of_day(text) {
        return Some(minutes);
    }

    let parsed = text.rsplit_once(':').and_then(|(hhmm, seconds)| {
        let valid_seconds = seconds.len() == 2
            && seconds.bytes().all(|b| b.is_ascii_digit())
            && seconds < "60";
        if valid_seconds {
            parse_time_of_day(hhmm)
        } else {
            None
        }
    });

    #[cfg(feature = "log")]
    {
        if parsed.is_none() {
            log::debug!("Rejected time-of-day text {text:?}");
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_with_seconds_truncates() {
        assert_eq!(TimeValue::from("08:30:59").to_minute_of_day(), Some(510));
        assert_eq!(TimeValue::from("08:30:60").to_minute_of_day(), None);
        assert_eq!(TimeValue::from("08:30:5").to_minute_of_day(), None);
    }

    #[test]
    fn minutes_accept_end_of_day() {
        assert_eq!(TimeValue::Minutes(1440).to_minute_of_day(), Some(1440));
        assert_eq!(TimeValue::Minutes(1441).to_minute_of_day(), None);
        assert_eq!(TimeValue::Minutes(-1).to_minute_of_day(), None);
    }
}
