//! Find the soonest date a court can be booked.
//!
//! Used as a fallback view when the backend has no concrete slot records for a
//! court yet: the rules alone decide the next bookable date.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::generator::{generate_slot_intervals, to_chip_labels, SlotInterval};
use crate::rule::{AvailabilityRule, Recurrence};
use crate::time::{minutes_to_hhmm, weekday_index};

/// The soonest bookable date and its slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestAvailability {
    pub date: NaiveDate,
    pub intervals: Vec<SlotInterval>,
    /// Chip labels of the slot start times.
    pub display_labels: Vec<String>,
}

/// Find the earliest date on or after `today` covered by a rule.
///
/// Date rules dated today or later are candidates as-is; each weekday of a
/// weekly rule contributes its next occurrence on or after `today`. The
/// earliest candidate wins, date rules first on a tie. Returns `None` when no
/// rule qualifies or when the winning rule yields no slots.
pub fn find_nearest_available_date(
    rules: &[AvailabilityRule],
    today: NaiveDate,
) -> Option<NearestAvailability> {
    let mut candidates: Vec<(NaiveDate, &AvailabilityRule)> = Vec::new();

    for rule in rules {
        if let Recurrence::Date(date) = rule.recurrence {
            if date >= today {
                candidates.push((date, rule));
            }
        }
    }

    let today_index = weekday_index(today);
    for rule in rules {
        if let Recurrence::Weekly(days) = rule.recurrence {
            for day in days.iter() {
                let offset = (day + 7 - today_index) % 7;
                if let Some(date) = today.checked_add_days(Days::new(offset as u64)) {
                    candidates.push((date, rule));
                }
            }
        }
    }

    // Stable: equal dates keep push order.
    candidates.sort_by_key(|(date, _)| *date);
    let (date, rule) = candidates.into_iter().next()?;

    let w = &rule.window;
    let intervals = generate_slot_intervals(w.start, w.end, w.slot_minutes, None);
    if intervals.is_empty() {
        #[cfg(feature = "log")]
        log::debug!("Nearest rule on {date} yields no slots");
        return None;
    }

    #[cfg(feature = "log")]
    log::debug!("Nearest available date is {date} with {} slots", intervals.len());

    let starts: Vec<String> = intervals
        .iter()
        .map(|slot| minutes_to_hhmm(slot.start as i64))
        .collect();

    Some(NearestAvailability {
        date,
        display_labels: to_chip_labels(&starts),
        intervals,
    })
}
