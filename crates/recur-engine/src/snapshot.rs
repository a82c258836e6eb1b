//! Plain serializable export of a rule set.
//!
//! ```json
//! {
//!   "start": "2014-01-01",
//!   "end": "2014-12-31",
//!   "exceptions": ["2014-01-05"],
//!   "rules": [{ "measure": "days", "units": { "2": true } }]
//! }
//! ```
//!
//! Dates use the `YYYY-MM-DD` form. The transient `from` cursor is not part of
//! a snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::{format_date, parse_date, ISO_FORMAT};
use crate::error::{RecurError, Result};
use crate::measure::{Family, Measure};
use crate::rule::Rule;
use crate::rule_set::RecurrenceRuleSet;
use crate::units::Units;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleSnapshot>,
}

/// One rule. `units` is written as a `{value: true}` map and accepts any
/// shape [`Units::from_json`] does when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSnapshot {
    pub measure: Measure,
    pub units: Value,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Rule> for RuleSnapshot {
    fn from(rule: &Rule) -> Self {
        let units: BTreeMap<String, bool> = rule
            .units()
            .iter()
            .map(|u| (u.to_string(), true))
            .collect();
        Self {
            measure: rule.measure(),
            units: serde_json::json!(units),
        }
    }
}

impl RecurrenceRuleSet {
    /// Export start, end, exceptions and rules.
    pub fn save(&self) -> Snapshot {
        let iso = |d| format_date(d, ISO_FORMAT).ok();
        Snapshot {
            start: self.start().and_then(iso),
            end: self.end().and_then(iso),
            exceptions: self.exceptions().iter().filter_map(|d| iso(*d)).collect(),
            rules: self.rules().iter().map(RuleSnapshot::from).collect(),
        }
    }

    /// Rebuild a rule set from a snapshot, re-validating every rule.
    ///
    /// `weeksOfMonthByDay` only requires a `daysOfWeek` rule somewhere in the
    /// snapshot, not before it, since replacing a rule moves it to the end.
    ///
    /// # Errors
    /// Any date or rule error, `MissingStart` for interval rules without a
    /// start, `WeekdayRequired` for an unpaired `weeksOfMonthByDay`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut set = RecurrenceRuleSet::new();
        if let Some(start) = &snapshot.start {
            set.set_start(parse_date(start)?)?;
        }
        if let Some(end) = &snapshot.end {
            set.set_end(parse_date(end)?)?;
        }
        for exception in &snapshot.exceptions {
            set.except(parse_date(exception)?)?;
        }

        for rule in &snapshot.rules {
            if rule.measure.family() == Family::Interval && set.start().is_none() {
                return Err(RecurError::MissingStart);
            }
            let units = Units::from_json(&rule.units)?;
            set.insert_rule(Rule::create(&units, rule.measure)?);
        }

        if set.has_rule(Measure::WeeksOfMonthByDay) && !set.has_rule(Measure::DaysOfWeek) {
            return Err(RecurError::WeekdayRequired);
        }

        Ok(set)
    }
}
