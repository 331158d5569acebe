//! Decide which availability rules apply on a calendar date.
//!
//! Date-specific and weekly rules that both match a date are returned
//! together. Callers that want a one-off date rule to replace the weekly
//! schedule must opt in with [`RulePrecedence::DateOverridesWeekly`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::AvailabilityRule;
use crate::time::weekday_index;

/// How date-specific rules interact with weekly rules on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePrecedence {
    /// Every matching rule applies, date-specific and weekly alike.
    #[default]
    Combined,
    /// If any date rule matches, weekly rules are ignored for that date.
    DateOverridesWeekly,
}

/// Return the rules that apply on `date`, in input order.
///
/// A date rule applies iff its date equals `date`. A weekly rule applies iff
/// its weekday set contains `weekday` (Sunday = 0, Monday = 1, ... Saturday = 6).
pub fn resolve_applicable_rules(
    rules: &[AvailabilityRule],
    date: NaiveDate,
    weekday: u8,
) -> Vec<&AvailabilityRule> {
    rules
        .iter()
        .filter(|rule| rule.applies_on(date, weekday))
        .collect()
}

/// [`resolve_applicable_rules`] with the weekday derived from `date`.
pub fn rules_for_date(rules: &[AvailabilityRule], date: NaiveDate) -> Vec<&AvailabilityRule> {
    resolve_applicable_rules(rules, date, weekday_index(date))
}

/// Resolve the rules for `date` under an explicit precedence policy.
pub fn resolve_with_precedence(
    rules: &[AvailabilityRule],
    date: NaiveDate,
    precedence: RulePrecedence,
) -> Vec<&AvailabilityRule> {
    let applicable = rules_for_date(rules, date);

    match precedence {
        RulePrecedence::Combined => applicable,
        RulePrecedence::DateOverridesWeekly => {
            if applicable.iter().any(|rule| rule.is_date_specific()) {
                applicable
                    .into_iter()
                    .filter(|rule| rule.is_date_specific())
                    .collect()
            } else {
                applicable
            }
        }
    }
}
