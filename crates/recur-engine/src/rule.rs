//! A single rule, and the staged form it takes before being committed.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::calendar::CalendarRule;
use crate::error::Result;
use crate::interval::IntervalRule;
use crate::measure::{Family, Measure};
use crate::units::Units;

/// A validated rule of either family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Interval(IntervalRule),
    Calendar(CalendarRule),
}

impl Rule {
    /// Validate `units` against `measure`, dispatching on the measure's family.
    pub fn create(units: &Units, measure: Measure) -> Result<Rule> {
        match measure.family() {
            Family::Interval => IntervalRule::create(units, measure).map(Rule::Interval),
            Family::Calendar => CalendarRule::create(units, measure).map(Rule::Calendar),
        }
    }

    pub fn measure(&self) -> Measure {
        match self {
            Rule::Interval(r) => r.measure(),
            Rule::Calendar(r) => r.measure(),
        }
    }

    pub fn units(&self) -> &BTreeSet<u32> {
        match self {
            Rule::Interval(r) => r.units(),
            Rule::Calendar(r) => r.units(),
        }
    }

    /// Interval rules measure from `anchor`; without one they never match.
    pub fn matches(&self, date: NaiveDate, anchor: Option<NaiveDate>) -> bool {
        match self {
            Rule::Interval(r) => anchor.is_some_and(|anchor| r.matches(anchor, date)),
            Rule::Calendar(r) => r.matches(date),
        }
    }
}

/// A rule that has been described but not yet validated against a rule set.
///
/// Passing it to [`RecurrenceRuleSet::commit`](crate::RecurrenceRuleSet::commit)
/// either applies it in full or leaves the rule set untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRule {
    pub measure: Measure,
    pub units: Units,
}

impl PendingRule {
    pub fn new(units: impl Into<Units>, measure: Measure) -> Self {
        Self {
            measure,
            units: units.into(),
        }
    }
}
