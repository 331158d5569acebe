//! Slot interval generation and display summaries.
//!
//! A rule's window is cut into consecutive slots of `slot_minutes`. Rules that
//! describe the same window at the same price collapse into one display entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resolver::rules_for_date;
use crate::rule::AvailabilityRule;
use crate::time::minutes_to_hhmm;

/// Maximum number of literal chip labels before the overflow marker.
pub const MAX_CHIPS: usize = 3;

/// A concrete bookable interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start: u32,
    pub end: u32,
    /// `None` for generated slots; backend slots carry their booking state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl SlotInterval {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            available: None,
        }
    }

    pub fn with_availability(start: u32, end: u32, available: bool) -> Self {
        Self {
            start,
            end,
            available: Some(available),
        }
    }

    /// Only an explicit `available: false` marks a slot as taken.
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Presentation grouping for consecutive distinct day entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Primary,
    Secondary,
    Tertiary,
}

impl Tone {
    /// Tone of the `index`-th distinct entry; repeats every three entries.
    pub fn cycle(index: usize) -> Tone {
        match index % 3 {
            0 => Tone::Primary,
            1 => Tone::Secondary,
            _ => Tone::Tertiary,
        }
    }
}

/// One display entry of a day: a rule window with its slot start times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub start: u32,
    pub end: u32,
    pub price: f64,
    pub slot_minutes: u32,
    /// `"HH:MM-HH:MM"`.
    pub label: String,
    /// Slot start times, truncated by [`to_chip_labels`].
    pub start_times: Vec<String>,
    pub tone: Tone,
}

/// The display-ready availability of one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Short human label, e.g. `"Mon 19 Oct"`.
    pub date_label: String,
    pub date_key: NaiveDate,
    pub slots: Vec<SlotSummary>,
}

/// Cut `[start, end)` into consecutive slots of `slot_minutes`.
///
/// A trailing remainder shorter than one slot is dropped. At most `limit`
/// slots are returned when a limit is given. Degenerate input (zero slot
/// length, `start >= end`) yields an empty list.
pub fn generate_slot_intervals(
    start: u32,
    end: u32,
    slot_minutes: u32,
    limit: Option<usize>,
) -> Vec<SlotInterval> {
    if slot_minutes == 0 || start >= end {
        #[cfg(feature = "log")]
        log::trace!("No slots for degenerate window {start}..{end} step {slot_minutes}");
        return Vec::new();
    }

    let max = limit.unwrap_or(usize::MAX);
    let mut intervals = Vec::new();
    let mut current = start;

    while intervals.len() < max {
        let next = match current.checked_add(slot_minutes) {
            Some(next) if next <= end => next,
            _ => break,
        };
        intervals.push(SlotInterval::new(current, next));
        current = next;
    }

    intervals
}

/// Keep at most [`MAX_CHIPS`] labels and append `"+N more"` for the rest.
pub fn to_chip_labels<S: AsRef<str>>(times: &[S]) -> Vec<String> {
    let mut chips: Vec<String> = times
        .iter()
        .take(MAX_CHIPS)
        .map(|t| t.as_ref().to_string())
        .collect();

    if times.len() > MAX_CHIPS {
        chips.push(format!("+{} more", times.len() - MAX_CHIPS));
    }

    chips
}

/// Collapse rules into display entries.
///
/// Rules sharing the same `(start, end, price)` produce a single entry; the
/// first one seen wins. Entries keep input order and are assigned cycling
/// [`Tone`]s.
pub fn summarize_rules<'a, I>(rules: I) -> Vec<SlotSummary>
where
    I: IntoIterator<Item = &'a AvailabilityRule>,
{
    let mut summaries: Vec<SlotSummary> = Vec::new();

    for rule in rules {
        let w = &rule.window;
        let duplicate = summaries
            .iter()
            .any(|s| s.start == w.start && s.end == w.end && s.price == w.price);
        if duplicate {
            continue;
        }

        let starts: Vec<String> = generate_slot_intervals(w.start, w.end, w.slot_minutes, None)
            .iter()
            .map(|slot| minutes_to_hhmm(slot.start as i64))
            .collect();

        summaries.push(SlotSummary {
            start: w.start,
            end: w.end,
            price: w.price,
            slot_minutes: w.slot_minutes,
            label: w.label(),
            start_times: to_chip_labels(&starts),
            tone: Tone::cycle(summaries.len()),
        });
    }

    summaries
}

/// Build the schedule of a single date from the rules that apply on it.
pub fn build_day_schedule(rules: &[AvailabilityRule], date: NaiveDate) -> DaySchedule {
    DaySchedule {
        date_label: date.format("%a %-d %b").to_string(),
        date_key: date,
        slots: summarize_rules(rules_for_date(rules, date)),
    }
}

/// Build schedules for `days` consecutive dates starting at `from`.
pub fn build_schedule(rules: &[AvailabilityRule], from: NaiveDate, days: u32) -> Vec<DaySchedule> {
    from.iter_days()
        .take(days as usize)
        .map(|date| build_day_schedule(rules, date))
        .collect()
}
