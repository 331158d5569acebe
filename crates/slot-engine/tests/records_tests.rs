//! Tests for converting backend wire records into engine values.

use chrono::NaiveDate;
use slot_engine::catalog::CourtSort;
use slot_engine::error::SlotError;
use slot_engine::overlap::TimeWindowFilter;
use slot_engine::records::{
    parse_court_query_json, parse_courts_json, parse_rules_json, parse_slots_json, rules_to_json,
};
use slot_engine::resolver::rules_for_date;
use slot_engine::rule::{AvailabilityRule, Recurrence};

#[test]
fn weekly_and_date_records_convert() {
    let json = r#"[
        {"startTime": "08:00", "endTime": "12:00", "slotMinutes": 30, "price": 20, "weekdays": [1, 3]},
        {"startTime": "18:00:00", "endTime": 1260, "slotMinutes": 60, "price": 35.5, "date": "2026-03-20"}
    ]"#;

    let rules = parse_rules_json(json).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].window.start, 480);
    assert_eq!(rules[0].window.end, 720);
    match rules[0].recurrence {
        Recurrence::Weekly(days) => assert_eq!(days.iter().collect::<Vec<_>>(), vec![1, 3]),
        other => panic!("expected weekly rule, got {:?}", other),
    }
    assert_eq!(rules[1].window.start, 1080);
    assert_eq!(rules[1].window.price, 35.5);
    assert_eq!(
        rules[1].recurrence,
        Recurrence::Date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap())
    );
}

#[test]
fn price_defaults_to_zero() {
    let json = r#"[{"startTime": "08:00", "endTime": "09:00", "slotMinutes": 60, "weekdays": [0]}]"#;
    assert_eq!(parse_rules_json(json).unwrap()[0].window.price, 0.0);
}

#[test]
fn record_needs_exactly_one_recurrence() {
    let neither = r#"[{"startTime": "08:00", "endTime": "09:00", "slotMinutes": 60}]"#;
    assert!(matches!(parse_rules_json(neither), Err(SlotError::InvalidRecord(_))));

    let both = r#"[{"startTime": "08:00", "endTime": "09:00", "slotMinutes": 60,
                    "weekdays": [1], "date": "2026-03-20"}]"#;
    assert!(matches!(parse_rules_json(both), Err(SlotError::InvalidRecord(_))));
}

#[test]
fn invalid_fields_are_reported() {
    let bad_time = r#"[{"startTime": "8am", "endTime": "09:00", "slotMinutes": 60, "weekdays": [1]}]"#;
    assert!(matches!(parse_rules_json(bad_time), Err(SlotError::InvalidTime(_))));

    let bad_date = r#"[{"startTime": "08:00", "endTime": "09:00", "slotMinutes": 60, "date": "20/03/2026"}]"#;
    assert!(matches!(parse_rules_json(bad_date), Err(SlotError::InvalidDate(_))));

    let bad_day = r#"[{"startTime": "08:00", "endTime": "09:00", "slotMinutes": 60, "weekdays": [7]}]"#;
    assert!(matches!(parse_rules_json(bad_day), Err(SlotError::InvalidWeekday(7))));

    let reversed = r#"[{"startTime": "10:00", "endTime": "09:00", "slotMinutes": 60, "weekdays": [1]}]"#;
    assert!(matches!(parse_rules_json(reversed), Err(SlotError::InvalidWindow { .. })));

    assert!(matches!(parse_rules_json("{"), Err(SlotError::Json(_))));
}

#[test]
fn slot_records_keep_availability_and_overnight_shape() {
    let json = r#"[
        {"start": "23:00", "end": "01:00"},
        {"start": 600, "end": 660, "available": false}
    ]"#;

    let slots = parse_slots_json(json).unwrap();

    assert_eq!((slots[0].start, slots[0].end), (1380, 60));
    assert_eq!(slots[0].available, None);
    assert_eq!(slots[1].available, Some(false));
}

#[test]
fn court_records_convert_with_defaults() {
    let json = r#"[{"id": "c1", "name": "Centre", "sport": "tennis", "price": 18,
                    "slots": [{"start": "09:00", "end": "10:00", "available": true}]}]"#;

    let courts = parse_courts_json(json).unwrap();

    assert_eq!(courts.len(), 1);
    assert_eq!(courts[0].venue, "");
    assert!(!courts[0].indoor);
    assert_eq!(courts[0].slots[0].start, 540);
}

#[test]
fn resolved_rules_serialize_back_to_records() {
    let json = r#"[
        {"startTime": "08:00", "endTime": "12:00", "slotMinutes": 30, "price": 20, "weekdays": [1, 3]},
        {"startTime": "22:00", "endTime": 1440, "slotMinutes": 60, "price": 35.5, "date": "2026-03-16"},
        {"startTime": "18:00", "endTime": "20:00", "slotMinutes": 60, "weekdays": [5]}
    ]"#;
    let rules = parse_rules_json(json).unwrap();
    let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

    let resolved = rules_for_date(&rules, monday);
    let out = rules_to_json(resolved.iter().copied()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["startTime"], "08:00");
    assert_eq!(value[0]["weekdays"], serde_json::json!([1, 3]));
    assert_eq!(value[1]["endTime"], 1440);
    assert_eq!(value[1]["date"], "2026-03-16");

    let reparsed: Vec<AvailabilityRule> = parse_rules_json(&out).unwrap();
    assert_eq!(reparsed, vec![rules[0], rules[1]]);
}

#[test]
fn court_query_takes_text_window_bounds() {
    let query = parse_court_query_json(
        r#"{"sport": "padel", "from": "22:00", "to": "02:00", "sort": "earliest"}"#,
    )
    .unwrap();

    assert_eq!(query.sport.as_deref(), Some("padel"));
    assert_eq!(query.window, TimeWindowFilter::new(Some(1320), Some(120)));
    assert_eq!(query.sort, Some(CourtSort::Earliest));
}

#[test]
fn court_query_drops_malformed_bounds() {
    let query = parse_court_query_json(r#"{"from": "10pm", "to": "23:00"}"#).unwrap();
    assert_eq!(query.window, TimeWindowFilter::new(None, Some(1380)));

    assert!(parse_court_query_json("{}").unwrap().window.is_open());
}
