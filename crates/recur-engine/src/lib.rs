//! # recur-engine
//!
//! Composable calendar recurrence rules for date-only values.
//!
//! A [`RecurrenceRuleSet`] AND-combines interval rules ("every 2 weeks from
//! the start date") with calendar rules ("the 2nd and 4th Sunday of the
//! month"), subtracts exception dates, and clips to optional start/end
//! bounds. It answers "does this date match?" and enumerates matching dates
//! forward, backward, or across the whole bounded range.
//!
//! ```rust
//! use recur_engine::RecurrenceRuleSet;
//!
//! let mut set = RecurrenceRuleSet::new();
//! set.set_start("2014-01-01").unwrap();
//! set.every(2).days().unwrap();
//!
//! let next = set.next_formatted(3, "%Y-%m-%d").unwrap();
//! assert_eq!(next, ["2014-01-03", "2014-01-05", "2014-01-07"]);
//! ```
//!
//! ## Modules
//!
//! - [`rule_set`] — the aggregate: rules, exceptions, bounds, matching
//! - [`calendar`] — day-of-week, day-of-month, week-of-month/year, month rules
//! - [`interval`] — every N days/weeks/months/years from the anchor
//! - [`enumerator`] — next/previous/all occurrence queries
//! - [`pattern`] — fast candidate stepping for common rule shapes
//! - [`snapshot`] — plain serializable export and import
//! - [`date`] — date-only normalization and calendar projections
//! - [`units`] / [`measure`] — rule inputs
//! - [`error`] — Error types

pub mod calendar;
pub mod date;
pub mod enumerator;
pub mod error;
pub mod interval;
pub mod measure;
pub mod pattern;
pub mod rule;
pub mod rule_set;
pub mod snapshot;
pub mod units;

pub use date::{CalendarFields, IntoDateOnly};
pub use enumerator::Direction;
pub use error::{ErrorKind, RecurError};
pub use measure::{Family, Measure};
pub use rule::{PendingRule, Rule};
pub use rule_set::{Every, RecurrenceRuleSet};
pub use snapshot::{RuleSnapshot, Snapshot};
pub use units::{UnitValue, Units};
