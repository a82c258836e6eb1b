//! Unit arguments for rules.
//!
//! Callers may hand over a single value, a list, or a `{value: true}` flag map,
//! and values may be numbers or weekday/month names. [`Units`] is the tagged
//! form of that input and [`Units::normalize`] turns it into the canonical
//! set of integers a matcher works on.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::{Month, Weekday};
use serde_json::Value;

use crate::date;
use crate::error::{RecurError, Result};
use crate::measure::Measure;

/// One raw unit: a number, or a name to resolve against the measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitValue {
    Number(i64),
    Name(String),
}

/// Raw units as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Units {
    One(UnitValue),
    Many(Vec<UnitValue>),
    /// Keys mapped to `true` are selected; `false` entries are ignored.
    Flags(BTreeMap<String, bool>),
}

impl Units {
    /// Interpret a JSON value as units.
    ///
    /// Accepts integers, strings, arrays of those, and objects of booleans.
    pub fn from_json(value: &Value) -> Result<Units> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(unit_from_json)
                .collect::<Result<Vec<_>>>()
                .map(Units::Many),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| match v {
                    Value::Bool(b) => Ok((k.clone(), *b)),
                    other => Err(RecurError::InvalidUnits(format!(
                        "flag for {k:?} must be a boolean, got {other}"
                    ))),
                })
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Units::Flags),
            other => unit_from_json(other).map(Units::One),
        }
    }

    /// Resolve names and collect the distinct integer values.
    ///
    /// Names are only meaningful for `daysOfWeek` and `monthsOfYear`; numeric
    /// strings are accepted for every measure.
    pub fn normalize(&self, measure: Measure) -> Result<BTreeSet<i64>> {
        let resolved: BTreeSet<i64> = match self {
            Units::One(v) => BTreeSet::from([resolve(v, measure)?]),
            Units::Many(vs) => vs
                .iter()
                .map(|v| resolve(v, measure))
                .collect::<Result<_>>()?,
            Units::Flags(flags) => flags
                .iter()
                .filter(|(_, selected)| **selected)
                .map(|(k, _)| resolve_name(k, measure))
                .collect::<Result<_>>()?,
        };

        if resolved.is_empty() {
            return Err(RecurError::InvalidUnits(format!(
                "no units given for {measure}"
            )));
        }
        Ok(resolved)
    }
}

fn unit_from_json(value: &Value) -> Result<UnitValue> {
    match value {
        Value::Number(n) => n.as_i64().map(UnitValue::Number).ok_or_else(|| {
            RecurError::InvalidUnits(format!("{n} is not an integer"))
        }),
        Value::String(s) => Ok(UnitValue::Name(s.clone())),
        other => Err(RecurError::InvalidUnits(format!(
            "provide an array, object, string or number when passing units, got {other}"
        ))),
    }
}

fn resolve(value: &UnitValue, measure: Measure) -> Result<i64> {
    match value {
        UnitValue::Number(n) => Ok(*n),
        UnitValue::Name(name) => resolve_name(name, measure),
    }
}

fn resolve_name(name: &str, measure: Measure) -> Result<i64> {
    if let Ok(n) = name.trim().parse::<i64>() {
        return Ok(n);
    }

    let resolved = match measure {
        Measure::DaysOfWeek => date::weekday_number(name),
        Measure::MonthsOfYear => date::month_number(name),
        _ => None,
    };

    resolved
        .map(i64::from)
        .ok_or_else(|| RecurError::InvalidUnits(format!("{name:?} is not a valid {measure} unit")))
}

impl From<i64> for UnitValue {
    fn from(n: i64) -> Self {
        UnitValue::Number(n)
    }
}

impl From<i32> for UnitValue {
    fn from(n: i32) -> Self {
        UnitValue::Number(i64::from(n))
    }
}

impl From<u32> for UnitValue {
    fn from(n: u32) -> Self {
        UnitValue::Number(i64::from(n))
    }
}

impl From<&str> for UnitValue {
    fn from(s: &str) -> Self {
        UnitValue::Name(s.to_string())
    }
}

impl From<String> for UnitValue {
    fn from(s: String) -> Self {
        UnitValue::Name(s)
    }
}

impl From<Weekday> for UnitValue {
    fn from(wd: Weekday) -> Self {
        UnitValue::Number(i64::from(wd.num_days_from_sunday()))
    }
}

impl From<Month> for UnitValue {
    fn from(m: Month) -> Self {
        UnitValue::Number(i64::from(m.number_from_month() - 1))
    }
}

macro_rules! single_unit {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Units {
                fn from(v: $ty) -> Self {
                    Units::One(v.into())
                }
            }
        )*
    };
}

single_unit!(i64, i32, u32, &str, String, Weekday, Month, UnitValue);

impl<T: Into<UnitValue>> From<Vec<T>> for Units {
    fn from(vs: Vec<T>) -> Self {
        Units::Many(vs.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<UnitValue>, const N: usize> From<[T; N]> for Units {
    fn from(vs: [T; N]) -> Self {
        Units::Many(vs.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, bool>> for Units {
    fn from(flags: BTreeMap<String, bool>) -> Self {
        Units::Flags(flags)
    }
}
