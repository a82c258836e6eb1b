//! The user-facing aggregate: rules, exceptions and bounds.
//!
//! A date matches a [`RecurrenceRuleSet`] when it lies within `[start, end]`
//! (unless bounds are ignored), is not an exception, and satisfies every rule.
//! An empty rule set matches every date in range.

use chrono::NaiveDate;
use tracing::debug;

use crate::date::{parse_date, IntoDateOnly};
use crate::enumerator::{self, Direction};
use crate::error::{RecurError, Result};
use crate::measure::{Family, Measure};
use crate::rule::{PendingRule, Rule};
use crate::units::Units;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRuleSet {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    rules: Vec<Rule>,
    exceptions: Vec<NaiveDate>,
    /// Transient origin for next/previous; never saved.
    from: Option<NaiveDate>,
}

impl RecurrenceRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule set bounded by `start` and `end` (both inclusive).
    ///
    /// `start` later than `end` is accepted here and reported when
    /// enumerating.
    pub fn with_bounds(start: impl IntoDateOnly, end: impl IntoDateOnly) -> Result<Self> {
        Ok(Self {
            start: Some(start.into_date_only()?),
            end: Some(end.into_date_only()?),
            ..Self::default()
        })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn set_start(&mut self, date: impl IntoDateOnly) -> Result<&mut Self> {
        self.start = Some(date.into_date_only()?);
        Ok(self)
    }

    pub fn clear_start(&mut self) -> &mut Self {
        self.start = None;
        self
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn set_end(&mut self, date: impl IntoDateOnly) -> Result<&mut Self> {
        self.end = Some(date.into_date_only()?);
        Ok(self)
    }

    pub fn clear_end(&mut self) -> &mut Self {
        self.end = None;
        self
    }

    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn set_from_date(&mut self, date: impl IntoDateOnly) -> Result<&mut Self> {
        self.from = Some(date.into_date_only()?);
        Ok(self)
    }

    pub fn clear_from_date(&mut self) -> &mut Self {
        self.from = None;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn exceptions(&self) -> &[NaiveDate] {
        &self.exceptions
    }

    /// Stage `units` for a measure chosen by the returned builder.
    ///
    /// ```rust
    /// use recur_engine::RecurrenceRuleSet;
    ///
    /// let mut set = RecurrenceRuleSet::new();
    /// set.set_start("2014-01-01").unwrap();
    /// set.every(2).days().unwrap();
    /// assert!(set.matches("2014-01-05").unwrap());
    /// assert!(!set.matches("2014-01-04").unwrap());
    /// ```
    pub fn every(&mut self, units: impl Into<Units>) -> Every<'_> {
        Every {
            set: self,
            units: units.into(),
        }
    }

    /// Shorthand for committing a [`PendingRule`].
    pub fn add_rule(&mut self, units: impl Into<Units>, measure: Measure) -> Result<&mut Self> {
        self.commit(PendingRule::new(units, measure))
    }

    /// Validate a staged rule and apply it, replacing any rule already present
    /// for the same measure. The replacement moves to the end of the list.
    ///
    /// # Errors
    /// - `MissingStart` for an interval rule when no start date is set.
    /// - `InvalidUnits`, `InvalidInterval`, `OutOfRange` from rule validation.
    /// - `WeekdayRequired` for `weeksOfMonthByDay` without a `daysOfWeek` rule.
    ///
    /// On error the rule set is unchanged.
    pub fn commit(&mut self, pending: PendingRule) -> Result<&mut Self> {
        let PendingRule { measure, units } = pending;

        if measure.family() == Family::Interval && self.start.is_none() {
            return Err(RecurError::MissingStart);
        }

        let rule = Rule::create(&units, measure)?;

        if measure == Measure::WeeksOfMonthByDay && !self.has_rule(Measure::DaysOfWeek) {
            return Err(RecurError::WeekdayRequired);
        }

        self.insert_rule(rule);
        Ok(self)
    }

    pub(crate) fn insert_rule(&mut self, rule: Rule) {
        let measure = rule.measure();
        let before = self.rules.len();
        self.rules.retain(|r| r.measure() != measure);
        debug!(
            %measure,
            units = ?rule.units(),
            replaced = before != self.rules.len(),
            "rule committed"
        );
        self.rules.push(rule);
    }

    /// Mark `date` as never matching, whatever the rules say.
    pub fn except(&mut self, date: impl IntoDateOnly) -> Result<&mut Self> {
        self.exceptions.push(date.into_date_only()?);
        Ok(self)
    }

    /// Remove an exception when `target` parses as a date, otherwise remove
    /// the rule for the measure it names.
    ///
    /// # Errors
    /// `InvalidMeasure` when `target` is neither a date nor a measure name.
    pub fn forget(&mut self, target: &str) -> Result<&mut Self> {
        if let Ok(date) = parse_date(target) {
            return self.forget_exception(date);
        }
        let measure: Measure = target.parse()?;
        Ok(self.forget_rule(measure))
    }

    /// Remove the first exception equal to `date`, if any.
    pub fn forget_exception(&mut self, date: impl IntoDateOnly) -> Result<&mut Self> {
        let date = date.into_date_only()?;
        if let Some(pos) = self.exceptions.iter().position(|e| *e == date) {
            self.exceptions.remove(pos);
            debug!(%date, "exception forgotten");
        }
        Ok(self)
    }

    pub fn forget_rule(&mut self, measure: Measure) -> &mut Self {
        self.rules.retain(|r| r.measure() != measure);
        debug!(%measure, "rule forgotten");
        self
    }

    pub fn has_rule(&self, measure: Measure) -> bool {
        self.rules.iter().any(|r| r.measure() == measure)
    }

    /// Whether any rule is set.
    pub fn repeats(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Test `date` against bounds, exceptions and every rule.
    ///
    /// # Errors
    /// `InvalidDate` when `date` is an unparseable string.
    pub fn matches(&self, date: impl IntoDateOnly) -> Result<bool> {
        Ok(self.matches_date(date.into_date_only()?, false))
    }

    /// Like [`matches`](Self::matches), but dates outside `[start, end]` are
    /// still evaluated.
    pub fn matches_ignoring_bounds(&self, date: impl IntoDateOnly) -> Result<bool> {
        Ok(self.matches_date(date.into_date_only()?, true))
    }

    pub(crate) fn matches_date(&self, date: NaiveDate, ignore_bounds: bool) -> bool {
        if !ignore_bounds && !self.in_range(date) {
            return false;
        }
        if self.exceptions.contains(&date) {
            return false;
        }
        self.rules.iter().all(|rule| rule.matches(date, self.start))
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// The next `n` matching dates after `from` (or `start`).
    ///
    /// Candidates are not checked against `start`/`end`; enumeration only stops
    /// early once the cursor reaches `end`. A date past `end` can therefore be
    /// returned when the cursor starts beyond it.
    pub fn next(&self, n: usize) -> Result<Vec<NaiveDate>> {
        enumerator::occurrences(self, Direction::Next, Some(n))
    }

    /// The `n` matching dates before `from` (or `start`), nearest first.
    pub fn previous(&self, n: usize) -> Result<Vec<NaiveDate>> {
        enumerator::occurrences(self, Direction::Previous, Some(n))
    }

    /// Every matching date from `from` (or `start`) through `end`.
    ///
    /// # Errors
    /// `MissingOrigin`, `MissingEnd`, or `StartAfterEnd`.
    pub fn all(&self) -> Result<Vec<NaiveDate>> {
        enumerator::occurrences(self, Direction::All, None)
    }

    pub fn next_formatted(&self, n: usize, fmt: &str) -> Result<Vec<String>> {
        enumerator::format_all(&self.next(n)?, fmt)
    }

    pub fn previous_formatted(&self, n: usize, fmt: &str) -> Result<Vec<String>> {
        enumerator::format_all(&self.previous(n)?, fmt)
    }

    pub fn all_formatted(&self, fmt: &str) -> Result<Vec<String>> {
        enumerator::format_all(&self.all()?, fmt)
    }
}

/// Units staged by [`RecurrenceRuleSet::every`], waiting for a measure.
///
/// Each method commits the rule and hands the rule set back for chaining.
#[must_use = "units are only applied once a measure is chosen"]
pub struct Every<'a> {
    set: &'a mut RecurrenceRuleSet,
    units: Units,
}

impl<'a> Every<'a> {
    pub fn measure(self, measure: Measure) -> Result<&'a mut RecurrenceRuleSet> {
        self.set.commit(PendingRule {
            measure,
            units: self.units,
        })
    }

    pub fn days(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::Days)
    }

    pub fn weeks(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::Weeks)
    }

    pub fn months(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::Months)
    }

    pub fn years(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::Years)
    }

    pub fn days_of_week(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::DaysOfWeek)
    }

    pub fn days_of_month(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::DaysOfMonth)
    }

    pub fn weeks_of_month(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::WeeksOfMonth)
    }

    pub fn weeks_of_month_by_day(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::WeeksOfMonthByDay)
    }

    pub fn weeks_of_year(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::WeeksOfYear)
    }

    pub fn months_of_year(self) -> Result<&'a mut RecurrenceRuleSet> {
        self.measure(Measure::MonthsOfYear)
    }
}
