//! Property-based tests for rule matching and enumeration using proptest.
//!
//! These tests verify invariants that should hold for *any* valid rule set,
//! not just the specific examples in the other test files.

use chrono::{Datelike, Days, Months, NaiveDate};
use proptest::prelude::*;
use recur_engine::{Measure, RecurrenceRuleSet, Snapshot};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A date in the 2012-2016 range, leap years included.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..5 * 366).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2012, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(offset)))
            .expect("offset stays in range")
    })
}

fn arb_interval_measure() -> impl Strategy<Value = Measure> {
    prop_oneof![
        Just(Measure::Days),
        Just(Measure::Weeks),
        Just(Measure::Months),
        Just(Measure::Years),
    ]
}

fn arb_interval() -> impl Strategy<Value = u32> {
    1u32..=6
}

fn arb_days_of_week() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(0i64..=6, 1..=3).prop_map(|s| s.into_iter().collect())
}

fn arb_days_of_month() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(1i64..=31, 1..=4).prop_map(|s| s.into_iter().collect())
}

/// A bounded rule set with a mix of calendar rules and an optional interval.
fn arb_rule_set() -> impl Strategy<Value = RecurrenceRuleSet> {
    (
        arb_date(),
        0u64..120,
        prop::option::of(arb_days_of_week()),
        prop::option::of(arb_days_of_month()),
        prop::option::of(1i64..=3),
    )
        .prop_map(|(start, span, weekdays, monthdays, weeks)| {
            let end = start + Days::new(span);
            let mut set = RecurrenceRuleSet::with_bounds(start, end).expect("valid bounds");
            if let Some(units) = weekdays {
                set.add_rule(units, Measure::DaysOfWeek).expect("valid weekdays");
            }
            if let Some(units) = monthdays {
                set.add_rule(units, Measure::DaysOfMonth).expect("valid days");
            }
            if let Some(n) = weeks {
                set.add_rule(n, Measure::Weeks).expect("valid weeks");
            }
            set
        })
}

fn shift(anchor: NaiveDate, measure: Measure, steps: u32) -> Option<NaiveDate> {
    match measure {
        Measure::Days => anchor.checked_add_days(Days::new(u64::from(steps))),
        Measure::Weeks => anchor.checked_add_days(Days::new(7 * u64::from(steps))),
        Measure::Months => anchor.checked_add_months(Months::new(steps)),
        Measure::Years => anchor.checked_add_months(Months::new(12 * steps)),
        _ => None,
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: anchor + k*u always matches an interval rule of u
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn interval_multiples_match(
        anchor in arb_date(),
        measure in arb_interval_measure(),
        unit in arb_interval(),
        k in 0u32..=10,
    ) {
        let mut set = RecurrenceRuleSet::new();
        set.set_start(anchor).unwrap();
        set.add_rule(unit, measure).unwrap();

        let date = shift(anchor, measure, k * unit).unwrap();
        prop_assert!(set.matches(date).unwrap(), "{anchor} + {k}*{unit} {measure} = {date}");
    }
}

// ---------------------------------------------------------------------------
// Property 2: a day interval matches exactly the multiples of the unit
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn day_interval_matches_only_multiples(
        anchor in arb_date(),
        unit in arb_interval(),
        offset in 0u64..400,
    ) {
        let mut set = RecurrenceRuleSet::new();
        set.set_start(anchor).unwrap();
        set.every(unit).days().unwrap();

        let date = anchor + Days::new(offset);
        prop_assert_eq!(set.matches(date).unwrap(), offset % u64::from(unit) == 0);
    }
}

// ---------------------------------------------------------------------------
// Property 3: the last day of every month matches day 31
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn last_day_of_month_matches_day_31(date in arb_date()) {
        let mut set = RecurrenceRuleSet::new();
        set.every(31).days_of_month().unwrap();

        let is_last = date.succ_opt().is_some_and(|next| next.month() != date.month());
        prop_assert_eq!(set.matches(date).unwrap(), is_last);
    }
}

// ---------------------------------------------------------------------------
// Property 4: an exception never matches, whatever the rules say
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn exceptions_never_match(set in arb_rule_set(), offset in 0u64..120) {
        let mut set = set;
        let date = set.start().unwrap() + Days::new(offset);
        set.except(date).unwrap();
        prop_assert!(!set.matches(date).unwrap());
        prop_assert!(!set.all().unwrap().contains(&date));
    }
}

// ---------------------------------------------------------------------------
// Property 5: all() is sorted, bounded, and agrees with day-by-day matching
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn all_agrees_with_linear_matching(set in arb_rule_set()) {
        let all = set.all().unwrap();
        let (start, end) = (set.start().unwrap(), set.end().unwrap());

        for pair in all.windows(2) {
            prop_assert!(pair[0] < pair[1], "not strictly ascending: {:?}", pair);
        }

        let expected: Vec<NaiveDate> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| set.matches(*d).unwrap())
            .collect();
        prop_assert_eq!(all, expected);
    }
}

// ---------------------------------------------------------------------------
// Property 6: next() is strictly ascending and previous() strictly descending
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn next_and_previous_are_monotonic(
        anchor in arb_date(),
        weekdays in arb_days_of_week(),
        n in 1usize..=10,
    ) {
        let mut set = RecurrenceRuleSet::new();
        set.set_start(anchor).unwrap();
        set.add_rule(weekdays, Measure::DaysOfWeek).unwrap();

        let next = set.next(n).unwrap();
        prop_assert_eq!(next.len(), n);
        prop_assert!(next[0] > anchor);
        prop_assert!(next.windows(2).all(|p| p[0] < p[1]));

        let previous = set.previous(n).unwrap();
        prop_assert_eq!(previous.len(), n);
        prop_assert!(previous[0] < anchor);
        prop_assert!(previous.windows(2).all(|p| p[0] > p[1]));
    }
}

// ---------------------------------------------------------------------------
// Property 7: save then load preserves matching
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn snapshot_round_trip_preserves_matches(set in arb_rule_set(), probe in arb_date()) {
        let json = set.save().to_json().unwrap();
        let restored = RecurrenceRuleSet::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();

        prop_assert_eq!(&restored, &set);
        prop_assert_eq!(restored.matches(probe).unwrap(), set.matches(probe).unwrap());
    }
}
