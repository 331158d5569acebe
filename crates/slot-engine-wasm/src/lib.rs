//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, schedules, the nearest-date fallback and court
//! filtering to the booking web client via `wasm-bindgen`. Rules, slots and
//! courts cross the boundary as JSON strings in the backend's record format
//! (see `slot_engine::records`); results are returned as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::records::{
    parse_court_query_json, parse_courts_json, parse_rules_json, parse_slots_json, rules_to_json,
};
use slot_engine::TimeWindowFilter;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a `YYYY-MM-DD` calendar date.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// Time utilities
// ---------------------------------------------------------------------------

/// Parse strict `H:MM`/`HH:MM` text; `undefined` when malformed.
#[wasm_bindgen(js_name = "parseTimeOfDay")]
pub fn parse_time_of_day(raw: &str) -> Option<u32> {
    slot_engine::parse_time_of_day(raw)
}

/// Format minutes as `HH:MM`, wrapping around midnight.
#[wasm_bindgen(js_name = "minutesToHHMM")]
pub fn minutes_to_hhmm(minutes: i32) -> String {
    slot_engine::minutes_to_hhmm(minutes as i64)
}

/// Round up to the next quarter hour, wrapping at midnight.
#[wasm_bindgen(js_name = "roundUpToQuarter")]
pub fn round_up_to_quarter(minutes: u32) -> u32 {
    slot_engine::round_up_to_quarter(minutes)
}

// ---------------------------------------------------------------------------
// Rules and slots
// ---------------------------------------------------------------------------

/// Return the rules that apply on `date` as a JSON array of rule records, in
/// the same format the function accepts.
///
/// `weekday` uses the client numbering (Sunday = 0 ... Saturday = 6).
#[wasm_bindgen(js_name = "resolveApplicableRules")]
pub fn resolve_applicable_rules(
    rules_json: &str,
    date: &str,
    weekday: u8,
) -> Result<String, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(js_error)?;
    let date = parse_date(date)?;
    let applicable = slot_engine::resolve_applicable_rules(&rules, date, weekday);
    rules_to_json(applicable.into_iter()).map_err(js_error)
}

/// Cut `[start, end)` into slots; returns a JSON array of `{start, end}`.
#[wasm_bindgen(js_name = "generateSlotIntervals")]
pub fn generate_slot_intervals(
    start: u32,
    end: u32,
    slot_minutes: u32,
    limit: Option<u32>,
) -> Result<String, JsValue> {
    let slots =
        slot_engine::generate_slot_intervals(start, end, slot_minutes, limit.map(|l| l as usize));
    to_json(&slots)
}

/// Truncate a JSON array of start times into chip labels.
#[wasm_bindgen(js_name = "toChipLabels")]
pub fn to_chip_labels(times_json: &str) -> Result<String, JsValue> {
    let times: Vec<String> = serde_json::from_str(times_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid times JSON: {}", e)))?;
    to_json(&slot_engine::to_chip_labels(&times))
}

/// Find the soonest bookable date on or after `today`; JSON `null` if none.
#[wasm_bindgen(js_name = "findNearestAvailableDate")]
pub fn find_nearest_available_date(rules_json: &str, today: &str) -> Result<String, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(js_error)?;
    let today = parse_date(today)?;
    to_json(&slot_engine::find_nearest_available_date(&rules, today))
}

/// Build the schedule of one date.
#[wasm_bindgen(js_name = "buildDaySchedule")]
pub fn build_day_schedule(rules_json: &str, date: &str) -> Result<String, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(js_error)?;
    let date = parse_date(date)?;
    to_json(&slot_engine::build_day_schedule(&rules, date))
}

/// Build schedules for `days` consecutive dates starting at `from`.
#[wasm_bindgen(js_name = "buildSchedule")]
pub fn build_schedule(rules_json: &str, from: &str, days: u32) -> Result<String, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(js_error)?;
    let from = parse_date(from)?;
    to_json(&slot_engine::build_schedule(&rules, from, days))
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Whether any available slot overlaps the `[from, to)` window.
///
/// Bounds are `HH:MM` text; a missing or malformed bound does not constrain.
#[wasm_bindgen(js_name = "slotsOverlapWindow")]
pub fn slots_overlap_window(
    slots_json: &str,
    from: Option<String>,
    to: Option<String>,
) -> Result<bool, JsValue> {
    let slots = parse_slots_json(slots_json).map_err(js_error)?;
    let filter = TimeWindowFilter::from_text(from.as_deref(), to.as_deref());
    Ok(slot_engine::slots_overlap_window(&slots, &filter))
}

/// Filter and sort a JSON array of court records by a JSON query object.
///
/// The query's `from`/`to` bounds are `HH:MM` text, as in
/// [`slots_overlap_window`]; a malformed bound does not constrain.
#[wasm_bindgen(js_name = "filterCourts")]
pub fn filter_courts(courts_json: &str, query_json: &str) -> Result<String, JsValue> {
    let courts = parse_courts_json(courts_json).map_err(js_error)?;
    let query = parse_court_query_json(query_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid query JSON: {}", e)))?;
    to_json(&slot_engine::filter_courts(&courts, &query))
}
