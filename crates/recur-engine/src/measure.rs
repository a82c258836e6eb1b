//! The fixed vocabulary of rule measures.
//!
//! Every rule is expressed over exactly one [`Measure`]. Measures fall into two
//! families: interval measures count whole periods from the anchor date, and
//! calendar measures project a calendar field out of the date under test.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecurError;

/// Which matcher evaluates a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Interval,
    Calendar,
}

/// A rule dimension.
///
/// Serialized with the canonical plural camelCase names (`days`,
/// `daysOfWeek`, ...). Singular spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Measure {
    #[serde(rename = "days", alias = "day")]
    Days,
    #[serde(rename = "weeks", alias = "week")]
    Weeks,
    #[serde(rename = "months", alias = "month")]
    Months,
    #[serde(rename = "years", alias = "year")]
    Years,
    #[serde(rename = "daysOfWeek", alias = "dayOfWeek")]
    DaysOfWeek,
    #[serde(rename = "daysOfMonth", alias = "dayOfMonth")]
    DaysOfMonth,
    #[serde(rename = "weeksOfMonth", alias = "weekOfMonth")]
    WeeksOfMonth,
    #[serde(rename = "weeksOfMonthByDay", alias = "weekOfMonthByDay")]
    WeeksOfMonthByDay,
    #[serde(rename = "weeksOfYear", alias = "weekOfYear")]
    WeeksOfYear,
    #[serde(rename = "monthsOfYear", alias = "monthOfYear")]
    MonthsOfYear,
}

impl Measure {
    pub const ALL: [Measure; 10] = [
        Measure::Days,
        Measure::Weeks,
        Measure::Months,
        Measure::Years,
        Measure::DaysOfWeek,
        Measure::DaysOfMonth,
        Measure::WeeksOfMonth,
        Measure::WeeksOfMonthByDay,
        Measure::WeeksOfYear,
        Measure::MonthsOfYear,
    ];

    pub fn family(self) -> Family {
        match self {
            Measure::Days | Measure::Weeks | Measure::Months | Measure::Years => Family::Interval,
            _ => Family::Calendar,
        }
    }

    /// Inclusive range of valid unit values. `None` for interval measures,
    /// which only require strictly positive units.
    pub fn range(self) -> Option<RangeInclusive<u32>> {
        match self {
            Measure::DaysOfMonth => Some(1..=31),
            Measure::DaysOfWeek => Some(0..=6),
            Measure::WeeksOfMonth | Measure::WeeksOfMonthByDay => Some(0..=4),
            Measure::WeeksOfYear => Some(0..=52),
            Measure::MonthsOfYear => Some(0..=11),
            _ => None,
        }
    }

    /// Canonical (plural) name.
    pub fn as_str(self) -> &'static str {
        match self {
            Measure::Days => "days",
            Measure::Weeks => "weeks",
            Measure::Months => "months",
            Measure::Years => "years",
            Measure::DaysOfWeek => "daysOfWeek",
            Measure::DaysOfMonth => "daysOfMonth",
            Measure::WeeksOfMonth => "weeksOfMonth",
            Measure::WeeksOfMonthByDay => "weeksOfMonthByDay",
            Measure::WeeksOfYear => "weeksOfYear",
            Measure::MonthsOfYear => "monthsOfYear",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Measure::Days => "day",
            Measure::Weeks => "week",
            Measure::Months => "month",
            Measure::Years => "year",
            Measure::DaysOfWeek => "dayOfWeek",
            Measure::DaysOfMonth => "dayOfMonth",
            Measure::WeeksOfMonth => "weekOfMonth",
            Measure::WeeksOfMonthByDay => "weekOfMonthByDay",
            Measure::WeeksOfYear => "weekOfYear",
            Measure::MonthsOfYear => "monthOfYear",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .into_iter()
            .find(|m| m.as_str() == s || m.singular() == s)
            .ok_or_else(|| RecurError::InvalidMeasure(s.to_string()))
    }
}
