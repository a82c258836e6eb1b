//! Tests for exporting and importing rule sets as plain JSON.

use chrono::NaiveDate;
use recur_engine::{Measure, RecurError, RecurrenceRuleSet, Snapshot};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn load(json: &str) -> recur_engine::error::Result<RecurrenceRuleSet> {
    RecurrenceRuleSet::from_snapshot(&Snapshot::from_json(json)?)
}

#[test]
fn importable() {
    let set = load(
        r#"{
            "start": "2014-01-01",
            "end": "2014-01-31",
            "exceptions": ["2014-01-13"],
            "rules": [
                { "measure": "daysOfWeek", "units": { "1": true } }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(set.start(), Some(d(2014, 1, 1)));
    assert_eq!(set.end(), Some(d(2014, 1, 31)));
    assert!(set.has_rule(Measure::DaysOfWeek));
    assert_eq!(
        set.all().unwrap(),
        vec![d(2014, 1, 6), d(2014, 1, 20), d(2014, 1, 27)]
    );
}

#[test]
fn exportable() {
    let mut set = RecurrenceRuleSet::with_bounds("01/01/2014", "12/31/2014").unwrap();
    set.every(["Saturday", "Sunday"]).days_of_week().unwrap();
    set.except("07/05/2014").unwrap();

    let snapshot = set.save();
    assert_eq!(snapshot.start.as_deref(), Some("2014-01-01"));
    assert_eq!(snapshot.end.as_deref(), Some("2014-12-31"));
    assert_eq!(snapshot.exceptions, vec!["2014-07-05"]);
    assert_eq!(snapshot.rules.len(), 1);
    assert_eq!(snapshot.rules[0].measure, Measure::DaysOfWeek);
    assert_eq!(
        snapshot.rules[0].units,
        serde_json::json!({ "0": true, "6": true })
    );
}

#[test]
fn round_trip_preserves_behavior() {
    let mut set = RecurrenceRuleSet::with_bounds("2014-01-01", "2014-03-31").unwrap();
    set.every(2).weeks().unwrap();
    set.every("Wednesday").days_of_week().unwrap();
    set.except("2014-01-15").unwrap();

    let json = set.save().to_json_pretty().unwrap();
    let restored = load(&json).unwrap();

    assert_eq!(restored, set);
    assert_eq!(restored.all().unwrap(), set.all().unwrap());
}

#[test]
fn the_from_cursor_is_not_saved() {
    let mut set = RecurrenceRuleSet::new();
    set.set_start("2014-01-01").unwrap();
    set.set_from_date("2014-02-01").unwrap();

    let restored = RecurrenceRuleSet::from_snapshot(&set.save()).unwrap();
    assert_eq!(restored.from_date(), None);
    assert_eq!(restored.start(), Some(d(2014, 1, 1)));
}

#[test]
fn units_accept_every_input_shape() {
    for units in [r#"2"#, r#"[2]"#, r#"{"2": true}"#, r#""2""#] {
        let json = format!(
            r#"{{"start":"2014-01-01","rules":[{{"measure":"days","units":{units}}}]}}"#
        );
        let set = load(&json).unwrap();
        assert!(set.matches("2014-01-03").unwrap(), "units = {units}");
        assert!(!set.matches("2014-01-02").unwrap(), "units = {units}");
    }
}

#[test]
fn false_flags_are_dropped() {
    let set = load(
        r#"{"rules":[{"measure":"daysOfMonth","units":{"1":true,"2":false}}]}"#,
    )
    .unwrap();
    assert!(set.matches("2014-01-01").unwrap());
    assert!(!set.matches("2014-01-02").unwrap());
}

#[test]
fn singular_measure_names_load() {
    let set = load(r#"{"rules":[{"measure":"dayOfWeek","units":[0]}]}"#).unwrap();
    assert!(set.has_rule(Measure::DaysOfWeek));
}

#[test]
fn by_day_may_precede_days_of_week() {
    let set = load(
        r#"{"rules":[
            {"measure":"weeksOfMonthByDay","units":[0, 2]},
            {"measure":"daysOfWeek","units":["Sunday"]}
        ]}"#,
    )
    .unwrap();
    assert!(set.matches("2013-01-06").unwrap());
    assert!(!set.matches("2013-01-13").unwrap());
}

// ---------------------------------------------------------------------------
// Validation on load
// ---------------------------------------------------------------------------

#[test]
fn invalid_rules_are_rejected_on_load() {
    let err = load(r#"{"rules":[{"measure":"daysOfMonth","units":[32]}]}"#).unwrap_err();
    assert!(matches!(err, RecurError::OutOfRange { .. }));

    let err = load(r#"{"start":"2014-01-01","rules":[{"measure":"days","units":[0]}]}"#)
        .unwrap_err();
    assert!(matches!(err, RecurError::InvalidInterval));

    let err = load(r#"{"rules":[{"measure":"weeksOfMonthByDay","units":[1]}]}"#).unwrap_err();
    assert!(matches!(err, RecurError::WeekdayRequired));
}

#[test]
fn interval_rules_need_a_saved_start() {
    let err = load(r#"{"rules":[{"measure":"weeks","units":[1]}]}"#).unwrap_err();
    assert!(matches!(err, RecurError::MissingStart));
}

#[test]
fn unknown_measure_is_a_json_error() {
    let err = load(r#"{"rules":[{"measure":"fortnights","units":[1]}]}"#).unwrap_err();
    assert!(matches!(err, RecurError::Json(_)));
}

#[test]
fn bad_dates_are_rejected_on_load() {
    let err = load(r#"{"start":"someday"}"#).unwrap_err();
    assert!(matches!(err, RecurError::InvalidDate(_)));

    let err = load(r#"{"exceptions":["2014-02-30"]}"#).unwrap_err();
    assert!(matches!(err, RecurError::InvalidDate(_)));
}

#[test]
fn empty_object_is_an_unbounded_empty_set() {
    let set = load("{}").unwrap();
    assert_eq!(set, RecurrenceRuleSet::new());
}
