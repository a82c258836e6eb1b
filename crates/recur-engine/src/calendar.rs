//! Calendar rules: "the date's calendar position is one of these values".

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::date::CalendarFields;
use crate::error::{RecurError, Result};
use crate::measure::{Family, Measure};
use crate::units::Units;

/// A validated calendar rule. Every unit lies inside the measure's range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRule {
    measure: Measure,
    units: BTreeSet<u32>,
}

impl CalendarRule {
    /// Resolve weekday/month names, then check every value against the
    /// measure's range.
    ///
    /// # Errors
    /// `InvalidMeasure` for interval measures, `InvalidUnits` for malformed
    /// input, `OutOfRange` when any value falls outside the measure's range.
    pub fn create(units: &Units, measure: Measure) -> Result<Self> {
        let range = match (measure.family(), measure.range()) {
            (Family::Calendar, Some(range)) => range,
            _ => return Err(RecurError::InvalidMeasure(measure.to_string())),
        };

        let out_of_range = || RecurError::OutOfRange {
            measure: measure.to_string(),
            low: *range.start(),
            high: *range.end(),
        };

        let units = units
            .normalize(measure)?
            .into_iter()
            .map(|v| {
                u32::try_from(v)
                    .ok()
                    .filter(|v| range.contains(v))
                    .ok_or_else(out_of_range)
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

    pub fn matches(&self, date: NaiveDate) -> bool {
        matches(self.measure, &self.units, date)
    }
}

/// The calendar field a measure projects out of a date.
pub fn project(measure: Measure, date: NaiveDate) -> Option<u32> {
    match measure {
        Measure::DaysOfMonth => Some(date.day()),
        Measure::DaysOfWeek => Some(date.day_of_week()),
        Measure::WeeksOfMonth => Some(date.week_of_month()),
        Measure::WeeksOfMonthByDay => Some(date.week_of_month_by_weekday()),
        Measure::WeeksOfYear => Some(date.week_of_year()),
        Measure::MonthsOfYear => Some(date.month_of_year()),
        Measure::Days | Measure::Weeks | Measure::Months | Measure::Years => None,
    }
}

/// Test whether `date`'s projection for `measure` is one of `units`.
///
/// Day-of-month rules alias the end of the month: on the last day of a short
/// month, any listed day from that day through 31 counts as present, so a rule
/// on the 31st also fires on 30 April and 28 February. `date` is only read.
pub fn matches(measure: Measure, units: &BTreeSet<u32>, date: NaiveDate) -> bool {
    let Some(value) = project(measure, date) else {
        return false;
    };

    if units.contains(&value) {
        return true;
    }

    if measure == Measure::DaysOfMonth && value == date.last_day_of_month() && value < 31 {
        return units.range(value..=31).next().is_some();
    }

    false
}
