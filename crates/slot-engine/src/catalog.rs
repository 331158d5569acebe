//! Filtering and sorting of court listings.
//!
//! The time-window test from [`crate::overlap`] is combined with simple
//! equality filters on a court's sport, venue and tags.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::generator::SlotInterval;
use crate::overlap::{slots_overlap_window, TimeWindowFilter};

/// A court as listed on the browse page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub name: String,
    pub venue: String,
    pub sport: String,
    pub indoor: bool,
    pub heated: bool,
    /// Base price per slot.
    pub price: f64,
    pub slots: Vec<SlotInterval>,
}

impl Court {
    /// Earliest start among slots not marked unavailable.
    pub fn earliest_available_start(&self) -> Option<u32> {
        self.slots
            .iter()
            .filter(|slot| slot.is_available())
            .map(|slot| slot.start)
            .min()
    }
}

/// Sort order for the court listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtSort {
    PriceAsc,
    PriceDesc,
    /// By earliest available slot; courts without one go last.
    Earliest,
}

/// Filters selected on the browse page. `None` fields do not constrain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtQuery {
    pub sport: Option<String>,
    pub venue: Option<String>,
    pub indoor: Option<bool>,
    pub heated: Option<bool>,
    pub window: TimeWindowFilter,
    pub sort: Option<CourtSort>,
}

impl CourtQuery {
    pub fn matches(&self, court: &Court) -> bool {
        let sport_ok = self
            .sport
            .as_deref()
            .is_none_or(|sport| court.sport.eq_ignore_ascii_case(sport));
        let venue_ok = self.venue.as_deref().is_none_or(|venue| court.venue == venue);
        let indoor_ok = self.indoor.is_none_or(|indoor| court.indoor == indoor);
        let heated_ok = self.heated.is_none_or(|heated| court.heated == heated);

        sport_ok
            && venue_ok
            && indoor_ok
            && heated_ok
            && slots_overlap_window(&court.slots, &self.window)
    }
}

/// Apply `query` to `courts` and sort the survivors.
///
/// Sorting is stable: courts that compare equal keep their input order.
pub fn filter_courts<'a>(courts: &'a [Court], query: &CourtQuery) -> Vec<&'a Court> {
    let mut matched: Vec<&Court> = courts.iter().filter(|court| query.matches(court)).collect();

    match query.sort {
        Some(CourtSort::PriceAsc) => matched.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some(CourtSort::PriceDesc) => matched.sort_by(|a, b| b.price.total_cmp(&a.price)),
        Some(CourtSort::Earliest) => matched.sort_by(|a, b| {
            compare_earliest(a.earliest_available_start(), b.earliest_available_start())
        }),
        None => {}
    }

    #[cfg(feature = "log")]
    log::debug!("{} of {} courts match", matched.len(), courts.len());

    matched
}

fn compare_earliest(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
