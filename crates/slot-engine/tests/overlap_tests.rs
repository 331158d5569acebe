//! Tests for the time-of-day window filter.

use slot_engine::generator::SlotInterval;
use slot_engine::overlap::{slots_overlap_window, TimeWindowFilter};
use slot_engine::time::parse_time_of_day;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn hm(text: &str) -> u32 {
    parse_time_of_day(text).unwrap()
}

fn slot(start: &str, end: &str) -> SlotInterval {
    SlotInterval::new(hm(start), hm(end))
}

fn taken(start: &str, end: &str) -> SlotInterval {
    SlotInterval::with_availability(hm(start), hm(end), false)
}

fn window(from: Option<&str>, to: Option<&str>) -> TimeWindowFilter {
    TimeWindowFilter::new(from.map(hm), to.map(hm))
}

// ── Open window ─────────────────────────────────────────────────────────────

#[test]
fn open_window_matches_everything() {
    let filter = TimeWindowFilter::default();
    assert!(filter.is_open());
    assert!(slots_overlap_window(&[], &filter));
    assert!(slots_overlap_window(&[taken("08:00", "09:00")], &filter));
}

// ── Daytime window ──────────────────────────────────────────────────────────

#[test]
fn daytime_window_uses_half_open_overlap() {
    let filter = window(Some("10:00"), Some("12:00"));

    assert!(slots_overlap_window(&[slot("11:00", "13:00")], &filter));
    assert!(slots_overlap_window(&[slot("09:30", "10:30")], &filter));
    // Touching either edge is not an overlap.
    assert!(!slots_overlap_window(&[slot("09:00", "10:00")], &filter));
    assert!(!slots_overlap_window(&[slot("12:00", "13:00")], &filter));
}

#[test]
fn any_qualifying_slot_is_enough() {
    let filter = window(Some("18:00"), Some("20:00"));
    let slots = vec![slot("08:00", "09:00"), slot("19:00", "20:00")];
    assert!(slots_overlap_window(&slots, &filter));
}

#[test]
fn unavailable_slots_never_match() {
    let filter = window(Some("10:00"), Some("12:00"));
    assert!(!slots_overlap_window(&[taken("10:00", "11:00")], &filter));

    let mixed = vec![
        taken("10:00", "11:00"),
        SlotInterval::with_availability(hm("11:00"), hm("12:00"), true),
    ];
    assert!(slots_overlap_window(&mixed, &filter));
}

#[test]
fn no_slots_never_match_a_bounded_window() {
    assert!(!slots_overlap_window(&[], &window(Some("10:00"), None)));
}

// ── Overnight window ────────────────────────────────────────────────────────

#[test]
fn overnight_window_matches_slot_across_midnight() {
    let filter = window(Some("22:00"), Some("02:00"));
    assert!(filter.is_overnight());
    assert!(slots_overlap_window(&[slot("23:00", "01:00")], &filter));
}

#[test]
fn overnight_window_matches_late_or_early_slots() {
    let filter = window(Some("22:00"), Some("02:00"));

    assert!(slots_overlap_window(&[slot("22:30", "23:30")], &filter));
    assert!(slots_overlap_window(&[slot("00:30", "01:30")], &filter));
    assert!(!slots_overlap_window(&[slot("12:00", "13:00")], &filter));
    // Starts before the window and ends after it.
    assert!(!slots_overlap_window(&[slot("21:00", "03:00")], &filter));
}

#[test]
fn slot_crossing_midnight_misses_daytime_window() {
    // Compared as plain minutes: 23:00-01:00 does not overlap 00:00-02:00.
    let filter = window(Some("00:00"), Some("02:00"));
    assert!(!filter.is_overnight());
    assert!(!slots_overlap_window(&[slot("23:00", "01:00")], &filter));
    // The same slot matches once the window itself wraps past midnight.
    assert!(slots_overlap_window(
        &[slot("23:00", "01:00")],
        &window(Some("23:30"), Some("00:30"))
    ));
}

// ── One-sided windows ───────────────────────────────────────────────────────

#[test]
fn from_only_requires_start_at_or_after() {
    let filter = window(Some("18:00"), None);
    assert!(slots_overlap_window(&[slot("18:00", "19:00")], &filter));
    assert!(!slots_overlap_window(&[slot("17:30", "18:30")], &filter));
}

#[test]
fn to_only_requires_end_at_or_before() {
    let filter = window(None, Some("12:00"));
    assert!(slots_overlap_window(&[slot("11:00", "12:00")], &filter));
    assert!(!slots_overlap_window(&[slot("11:30", "12:30")], &filter));
}

// ── from_text ───────────────────────────────────────────────────────────────

#[test]
fn from_text_drops_malformed_bounds() {
    let filter = TimeWindowFilter::from_text(Some("7pm"), Some("21:00"));
    assert_eq!(filter, TimeWindowFilter::new(None, Some(1260)));

    let open = TimeWindowFilter::from_text(Some("nope"), None);
    assert!(open.is_open());
}

#[test]
fn filter_deserializes_with_missing_bounds() {
    let filter: TimeWindowFilter = serde_json::from_str(r#"{"from": 1320}"#).unwrap();
    assert_eq!(filter, TimeWindowFilter::new(Some(1320), None));
}
