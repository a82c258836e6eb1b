//! Interval rules: "every N days/weeks/months/years from the anchor".
//!
//! Intervals are anchor-relative, not epoch-relative: "every 2 weeks" counts
//! from the rule set's start date, in both directions.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::date::shift_months;
use crate::error::{RecurError, Result};
use crate::measure::{Family, Measure};
use crate::units::Units;

/// A validated interval rule. Every unit is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRule {
    measure: Measure,
    units: BTreeSet<u32>,
}

impl IntervalRule {
    /// # Errors
    /// `InvalidMeasure` for calendar measures, `InvalidUnits` for malformed
    /// input, `InvalidInterval` when any unit is zero or negative.
    pub fn create(units: &Units, measure: Measure) -> Result<Self> {
        if measure.family() != Family::Interval {
            return Err(RecurError::InvalidMeasure(measure.to_string()));
        }

        let units = units
            .normalize(measure)?
            .into_iter()
            .map(|v| {
                if v <= 0 {
                    return Err(RecurError::InvalidInterval);
                }
                u32::try_from(v)
                    .map_err(|_| RecurError::InvalidUnits(format!("interval {v} is too large")))
            })
            .collect::<Result<BTreeSet<u32>>>()?;

        Ok(Self { measure, units })
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn units(&self) -> &BTreeSet<u32> {
        &self.units
    }

    pub fn matches(&self, anchor: NaiveDate, date: NaiveDate) -> bool {
        matches(self.measure, &self.units, anchor, date)
    }
}

/// Absolute whole-unit difference between `anchor` and `date`.
///
/// Returns `None` when the difference is fractional in the given measure
/// (e.g. 10 days is not a whole number of weeks), or for calendar measures.
pub fn difference(measure: Measure, anchor: NaiveDate, date: NaiveDate) -> Option<i64> {
    let days = (date - anchor).num_days().abs();
    match measure {
        Measure::Days => Some(days),
        Measure::Weeks => (days % 7 == 0).then_some(days / 7),
        Measure::Months => month_difference(anchor, date),
        Measure::Years => month_difference(anchor, date)
            .filter(|months| months % 12 == 0)
            .map(|months| months / 12),
        _ => None,
    }
}

/// Whole months between two dates, honoring end-of-month clamping in either
/// direction: 31 January and 28 February are one month apart.
fn month_difference(a: NaiveDate, b: NaiveDate) -> Option<i64> {
    let (early, late) = if a <= b { (a, b) } else { (b, a) };
    let whole = i64::from(late.year() - early.year()) * 12 + i64::from(late.month0())
        - i64::from(early.month0());

    let forward = shift_months(early, whole) == Some(late);
    let backward = shift_months(late, -whole) == Some(early);
    (forward || backward).then_some(whole)
}

/// True when the difference between `anchor` and `date` is a whole multiple of
/// any unit in `units`.
pub fn matches(measure: Measure, units: &BTreeSet<u32>, anchor: NaiveDate, date: NaiveDate) -> bool {
    let Some(diff) = difference(measure, anchor, date) else {
        return false;
    };
    units.iter().any(|&unit| diff % i64::from(unit) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weeks_require_whole_weeks() {
        assert_eq!(difference(Measure::Weeks, d(2014, 1, 1), d(2014, 1, 15)), Some(2));
        assert_eq!(difference(Measure::Weeks, d(2014, 1, 1), d(2014, 1, 11)), None);
        assert_eq!(difference(Measure::Weeks, d(2014, 1, 15), d(2014, 1, 1)), Some(2));
    }

    #[test]
    fn months_clamp_at_month_end() {
        assert_eq!(month_difference(d(2014, 1, 31), d(2014, 2, 28)), Some(1));
        assert_eq!(month_difference(d(2014, 1, 31), d(2014, 3, 31)), Some(2));
        assert_eq!(month_difference(d(2014, 1, 31), d(2014, 3, 28)), None);
        assert_eq!(month_difference(d(2014, 3, 31), d(2014, 2, 28)), Some(1));
        assert_eq!(month_difference(d(2014, 1, 1), d(2014, 1, 3)), None);
        assert_eq!(month_difference(d(2014, 1, 1), d(2014, 1, 1)), Some(0));
    }

    #[test]
    fn years_are_twelve_month_multiples() {
        assert_eq!(difference(Measure::Years, d(2012, 2, 29), d(2013, 2, 28)), Some(1));
        assert_eq!(difference(Measure::Years, d(2013, 1, 1), d(2014, 7, 1)), None);
        assert_eq!(difference(Measure::Years, d(2013, 1, 1), d(2011, 1, 1)), Some(2));
    }
}
