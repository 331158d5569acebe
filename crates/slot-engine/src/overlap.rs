//! Time-of-day window filtering.
//!
//! A window with `from > to` wraps past midnight (e.g. 22:00-02:00). Slots
//! explicitly marked unavailable never match.

use serde::{Deserialize, Serialize};

use crate::generator::SlotInterval;
use crate::time::parse_time_of_day;

/// A user-selected time-of-day range. Either bound may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindowFilter {
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default)]
    pub to: Option<u32>,
}

impl TimeWindowFilter {
    pub fn new(from: Option<u32>, to: Option<u32>) -> Self {
        Self { from, to }
    }

    /// Build a filter from picker text. A malformed bound is dropped, so the
    /// filter fails open on that side.
    pub fn from_text(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_bound),
            to: to.and_then(parse_bound),
        }
    }

    /// No bound set: every court matches.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn is_overnight(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    /// Whether a single interval qualifies, ignoring its availability flag.
    ///
    /// The daytime branch compares `start` and `end` as plain minutes, so a
    /// slot that itself crosses midnight (e.g. 23:00-01:00) never overlaps a
    /// daytime window such as 00:00-02:00. Such slots match overnight windows
    /// and one-sided bounds only.
    pub fn matches(&self, interval: &SlotInterval) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from <= to => interval.start < to && interval.end > from,
            (Some(from), Some(to)) => interval.start >= from || interval.end <= to,
            (Some(from), None) => interval.start >= from,
            (None, Some(to)) => interval.end <= to,
            (None, None) => true,
        }
    }
}

fn parse_bound(raw: &str) -> Option<u32> {
    let parsed = parse_time_of_day(raw);

    #[cfg(feature = "log")]
    {
        if parsed.is_none() {
            log::debug!("Ignoring malformed window bound {raw:?}");
        }
    }

    parsed
}

/// Whether any available interval overlaps the window.
///
/// An open window matches regardless of the intervals.
pub fn slots_overlap_window(intervals: &[SlotInterval], filter: &TimeWindowFilter) -> bool {
    if filter.is_open() {
        return true;
    }

    intervals
        .iter()
        .filter(|interval| interval.is_available())
        .any(|interval| filter.matches(interval))
}
