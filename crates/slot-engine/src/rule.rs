//! Availability rules: when a court is bookable, at what price, and in what
//! slot granularity.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::{minutes_to_hhmm, MINUTES_PER_DAY};

/// The bookable window of a rule within one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleWindow {
    /// First bookable minute of day.
    pub start: u32,
    /// End of the window (exclusive); may be `1440`.
    pub end: u32,
    /// Length of each bookable slot.
    pub slot_minutes: u32,
    /// Price per slot.
    pub price: f64,
}

impl RuleWindow {
    /// Build a window, checking `start < end <= 1440`, a positive slot length
    /// and a non-negative price.
    pub fn new(start: u32, end: u32, slot_minutes: u32, price: f64) -> Result<Self> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(SlotError::InvalidWindow { start, end });
        }
        if slot_minutes == 0 {
            return Err(SlotError::InvalidSlotLength(slot_minutes));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(SlotError::InvalidPrice(price));
        }
        Ok(Self {
            start,
            end,
            slot_minutes,
            price,
        })
    }

    /// `"HH:MM-HH:MM"`, with an end of `1440` shown as `"24:00"`.
    pub fn label(&self) -> String {
        let end = if self.end == MINUTES_PER_DAY {
            "24:00".to_string()
        } else {
            minutes_to_hhmm(self.end as i64)
        };
        format!("{}-{}", minutes_to_hhmm(self.start as i64), end)
    }
}

/// A set of weekday indices, Sunday = 0 through Saturday = 6.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Build a set from weekday indices, rejecting anything outside `0..=6`.
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Result<Self> {
        let mut bits = 0u8;
        for day in indices {
            if day > 6 {
                return Err(SlotError::InvalidWeekday(day));
            }
            bits |= 1 << day;
        }
        Ok(WeekdaySet(bits))
    }

    pub fn contains(&self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |day| self.contains(*day))
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = SlotError;

    fn try_from(indices: Vec<u8>) -> Result<Self> {
        WeekdaySet::from_indices(indices)
    }
}

/// When a rule recurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Every week on the listed weekdays.
    Weekly(WeekdaySet),
    /// Once, on a single calendar date.
    Date(NaiveDate),
}

/// An admin-defined availability rule for a court.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub window: RuleWindow,
    pub recurrence: Recurrence,
}

impl AvailabilityRule {
    /// A weekly rule. Fails on an invalid window or weekday index.
    pub fn weekly<I: IntoIterator<Item = u8>>(
        start: u32,
        end: u32,
        slot_minutes: u32,
        price: f64,
        weekdays: I,
    ) -> Result<Self> {
        Ok(Self {
            window: RuleWindow::new(start, end, slot_minutes, price)?,
            recurrence: Recurrence::Weekly(WeekdaySet::from_indices(weekdays)?),
        })
    }

    /// A one-off rule for `date`. Fails on an invalid window.
    pub fn on_date(
        start: u32,
        end: u32,
        slot_minutes: u32,
        price: f64,
        date: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            window: RuleWindow::new(start, end, slot_minutes, price)?,
            recurrence: Recurrence::Date(date),
        })
    }

    pub fn is_date_specific(&self) -> bool {
        matches!(self.recurrence, Recurrence::Date(_))
    }

    /// Whether this rule applies on `date`, whose weekday index is `weekday`.
    pub fn applies_on(&self, date: NaiveDate, weekday: u8) -> bool {
        match self.recurrence {
            Recurrence::Date(d) => d == date,
            Recurrence::Weekly(days) => days.contains(weekday),
        }
    }
}
