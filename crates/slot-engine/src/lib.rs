//! # slot-engine
//!
//! Deterministic availability slots for court booking.
//!
//! The engine turns a court's weekly or date-specific availability rules into
//! concrete bookable intervals, finds the soonest bookable date, and filters a
//! court listing against a time-of-day window that may wrap past midnight.
//! Every function is pure: callers fetch rules and slots from their backend and
//! pass them in as values.
//!
//! ## Modules
//!
//! - [`time`] — minute-of-day parsing, formatting and quarter-hour rounding
//! - [`rule`] — availability rules (weekly or one-off date)
//! - [`resolver`] — which rules apply on a given date
//! - [`generator`] — slot intervals, day summaries and chip labels
//! - [`nearest`] — soonest date with bookable slots
//! - [`overlap`] — time-window overlap filter, including overnight windows
//! - [`catalog`] — court listing filters and sort orders
//! - [`records`] — wire records as the backend delivers them
//! - [`error`] — Error types

pub mod catalog;
pub mod error;
pub mod generator;
pub mod nearest;
pub mod overlap;
pub mod records;
pub mod resolver;
pub mod rule;
pub mod time;

pub use catalog::{filter_courts, Court, CourtQuery, CourtSort};
pub use error::SlotError;
pub use generator::{
    build_day_schedule, build_schedule, generate_slot_intervals, summarize_rules,
    to_chip_labels, DaySchedule, SlotInterval, SlotSummary, Tone,
};
pub use nearest::{find_nearest_available_date, NearestAvailability};
pub use overlap::{slots_overlap_window, TimeWindowFilter};
pub use records::{
    parse_court_query_json, parse_courts_json, parse_rules_json, parse_slots_json, rules_to_json,
};
pub use resolver::{
    resolve_applicable_rules, resolve_with_precedence, rules_for_date, RulePrecedence,
};
pub use rule::{AvailabilityRule, Recurrence, RuleWindow, WeekdaySet};
pub use time::{
    minutes_to_hhmm, parse_time_of_day, round_up_to_quarter, weekday_index, TimeValue,
};
