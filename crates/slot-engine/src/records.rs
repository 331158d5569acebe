//! Wire records as the booking backend delivers them.
//!
//! Times arrive as `"HH:MM"` text, `"HH:MM:SS"` text or minute numbers, and
//! weekly and date rules share one record shape. Each record converts into the
//! engine's validated types with `TryFrom`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Court, CourtQuery, CourtSort};
use crate::error::{Result, SlotError};
use crate::generator::SlotInterval;
use crate::rule::{AvailabilityRule, Recurrence, RuleWindow, WeekdaySet};
use crate::overlap::TimeWindowFilter;
use crate::time::{minutes_to_hhmm, TimeValue, MINUTES_PER_DAY};

/// An availability rule record. Exactly one of `weekdays` or `date` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub start_time: TimeValue,
    pub end_time: TimeValue,
    pub slot_minutes: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Vec<u8>>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A concrete slot with its booking state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub start: TimeValue,
    pub end: TimeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// A court listing with its concrete slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub venue: String,
    pub sport: String,
    #[serde(default)]
    pub indoor: bool,
    #[serde(default)]
    pub heated: bool,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
}

/// Court listing filters as the web client sends them. Window bounds are
/// `HH:MM` text, like every other time on the client surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtQueryRecord {
    pub sport: Option<String>,
    pub venue: Option<String>,
    pub indoor: Option<bool>,
    pub heated: Option<bool>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<CourtSort>,
}

fn minute_of(value: &TimeValue) -> Result<u32> {
    value
        .to_minute_of_day()
        .ok_or_else(|| SlotError::InvalidTime(format!("{:?}", value)))
}

impl TryFrom<&RuleRecord> for AvailabilityRule {
    type Error = SlotError;

    fn try_from(record: &RuleRecord) -> Result<Self> {
        let window = RuleWindow::new(
            minute_of(&record.start_time)?,
            minute_of(&record.end_time)?,
            record.slot_minutes,
            record.price,
        )?;

        let recurrence = match (&record.weekdays, &record.date) {
            (Some(days), None) => {
                Recurrence::Weekly(WeekdaySet::from_indices(days.iter().copied())?)
            }
            (None, Some(date)) => Recurrence::Date(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| SlotError::InvalidDate(date.clone()))?,
            ),
            (Some(_), Some(_)) => {
                return Err(SlotError::InvalidRecord(
                    "rule has both weekdays and date".to_string(),
                ))
            }
            (None, None) => {
                return Err(SlotError::InvalidRecord(
                    "rule has neither weekdays nor date".to_string(),
                ))
            }
        };

        Ok(AvailabilityRule { window, recurrence })
    }
}

/// `HH:MM` text; end-of-day (`1440`) has no text form and stays a number.
fn time_value_of(minutes: u32) -> TimeValue {
    if minutes >= MINUTES_PER_DAY {
        TimeValue::Minutes(minutes as i64)
    } else {
        TimeValue::Text(minutes_to_hhmm(minutes as i64))
    }
}

impl From<&AvailabilityRule> for RuleRecord {
    fn from(rule: &AvailabilityRule) -> Self {
        let (weekdays, date): (Option<Vec<u8>>, Option<String>) = match rule.recurrence {
            Recurrence::Weekly(days) => (Some(days.iter().collect()), None),
            Recurrence::Date(date) => (None, Some(date.format("%Y-%m-%d").to_string())),
        };

        RuleRecord {
            start_time: time_value_of(rule.window.start),
            end_time: time_value_of(rule.window.end),
            slot_minutes: rule.window.slot_minutes,
            price: rule.window.price,
            weekdays,
            date,
        }
    }
}

impl From<&CourtQueryRecord> for CourtQuery {
    /// Malformed window bounds are dropped, as in [`TimeWindowFilter::from_text`].
    fn from(record: &CourtQueryRecord) -> Self {
        CourtQuery {
            sport: record.sport.clone(),
            venue: record.venue.clone(),
            indoor: record.indoor,
            heated: record.heated,
            window: TimeWindowFilter::from_text(record.from.as_deref(), record.to.as_deref()),
            sort: record.sort,
        }
    }
}

impl TryFrom<&SlotRecord> for SlotInterval {
    type Error = SlotError;

    /// Overnight slots (end before start) are kept as delivered. A daytime
    /// filter window never matches them; see
    /// [`TimeWindowFilter::matches`](crate::overlap::TimeWindowFilter::matches).
    fn try_from(record: &SlotRecord) -> Result<Self> {
        Ok(SlotInterval {
            start: minute_of(&record.start)?,
            end: minute_of(&record.end)?,
            available: record.available,
        })
    }
}

impl TryFrom<&CourtRecord> for Court {
    type Error = SlotError;

    fn try_from(record: &CourtRecord) -> Result<Self> {
        let slots = record
            .slots
            .iter()
            .map(SlotInterval::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Court {
            id: record.id.clone(),
            name: record.name.clone(),
            venue: record.venue.clone(),
            sport: record.sport.clone(),
            indoor: record.indoor,
            heated: record.heated,
            price: record.price,
            slots,
        })
    }
}

/// Parse a JSON array of rule records.
pub fn parse_rules_json(json: &str) -> Result<Vec<AvailabilityRule>> {
    let records: Vec<RuleRecord> = serde_json::from_str(json)?;
    records.iter().map(AvailabilityRule::try_from).collect()
}

/// Serialize rules back into a JSON array of rule records.
pub fn rules_to_json<'a, I>(rules: I) -> Result<String>
where
    I: IntoIterator<Item = &'a AvailabilityRule>,
{
    let records: Vec<RuleRecord> = rules.into_iter().map(RuleRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse a court query object with `HH:MM` window bounds.
pub fn parse_court_query_json(json: &str) -> Result<CourtQuery> {
    let record: CourtQueryRecord = serde_json::from_str(json)?;
    Ok(CourtQuery::from(&record))
}

/// Parse a JSON array of slot records.
pub fn parse_slots_json(json: &str) -> Result<Vec<SlotInterval>> {
    let records: Vec<SlotRecord> = serde_json::from_str(json)?;
    records.iter().map(SlotInterval::try_from).collect()
}

/// Parse a JSON array of court records.
pub fn parse_courts_json(json: &str) -> Result<Vec<Court>> {
    let records: Vec<CourtRecord> = serde_json::from_str(json)?;
    records.iter().map(Court::try_from).collect()
}
