//! Fast candidate stepping for common rule shapes.
//!
//! A linear scan tests every day between two occurrences. For a lone
//! day-of-month rule, or a day-of-week rule optionally paired with a
//! single-unit `weeks` interval, the next candidate can be computed directly.
//! The pattern only proposes candidates; the enumerator still confirms each
//! one against the full rule set.

use chrono::{Datelike, Days, NaiveDate};

use crate::date::{first_of_next_month, start_of_week, CalendarFields};
use crate::measure::Measure;
use crate::rule::Rule;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    /// Candidates are days of the month, clamped to the month's last day.
    DaysOfMonth,
    /// Candidates are weekday offsets from Sunday. With an anchor week, only
    /// weeks a multiple of `step` away from it are visited.
    DaysOfWeek {
        step: u32,
        anchor_week: Option<NaiveDate>,
    },
}

/// Derived stepping state for one enumeration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrencePattern {
    shape: Shape,
    /// Sorted ascending.
    values: Vec<u32>,
    index: usize,
}

impl OccurrencePattern {
    /// Build a pattern for `rules`, or `None` when their shape has no fast path.
    ///
    /// `anchor` phases multi-week stepping so that no anchor-relative
    /// occurrence is stepped over.
    pub fn rebuild(rules: &[Rule], anchor: Option<NaiveDate>) -> Option<Self> {
        match rules {
            [only] if only.measure() == Measure::DaysOfMonth => Some(Self {
                shape: Shape::DaysOfMonth,
                values: only.units().iter().copied().collect(),
                index: 0,
            }),
            [only] if only.measure() == Measure::DaysOfWeek => Some(Self {
                shape: Shape::DaysOfWeek {
                    step: 1,
                    anchor_week: None,
                },
                values: only.units().iter().copied().collect(),
                index: 0,
            }),
            [a, b] => {
                let (days, weeks) = match (a.measure(), b.measure()) {
                    (Measure::DaysOfWeek, Measure::Weeks) => (a, b),
                    (Measure::Weeks, Measure::DaysOfWeek) => (b, a),
                    _ => return None,
                };
                if weeks.units().len() != 1 {
                    return None;
                }
                Some(Self {
                    shape: Shape::DaysOfWeek {
                        step: *weeks.units().first()?,
                        anchor_week: Some(start_of_week(anchor?)?),
                    },
                    values: days.units().iter().copied().collect(),
                    index: 0,
                })
            }
            _ => None,
        }
    }

    /// Move `working` to the next candidate strictly after it.
    ///
    /// Returns `false`, leaving `working` untouched, when the next candidate
    /// would fall outside the representable date range.
    pub fn next_date(&mut self, working: &mut NaiveDate) -> bool {
        let next = match self.shape {
            Shape::DaysOfMonth => self.next_day_of_month(*working),
            Shape::DaysOfWeek { step, anchor_week } => {
                self.next_day_of_week(*working, step, anchor_week)
            }
        };

        match next {
            Some(date) => {
                *working = date;
                true
            }
            None => false,
        }
    }

    fn next_day_of_month(&mut self, working: NaiveDate) -> Option<NaiveDate> {
        let mut month = working.with_day(1)?;
        loop {
            let last = month.last_day_of_month();
            while let Some(&day) = self.values.get(self.index) {
                self.index += 1;
                let candidate = month.checked_add_days(Days::new(u64::from(day.min(last) - 1)))?;
                if candidate > working {
                    return Some(candidate);
                }
            }
            self.index = 0;
            month = first_of_next_month(month)?;
        }
    }

    fn next_day_of_week(
        &mut self,
        working: NaiveDate,
        step: u32,
        anchor_week: Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        let mut week = start_of_week(working)?;
        loop {
            let in_phase = anchor_week.is_none_or(|anchor_week| {
                ((week - anchor_week).num_days() / 7).rem_euclid(i64::from(step)) == 0
            });
            if in_phase {
                while let Some(&offset) = self.values.get(self.index) {
                    self.index += 1;
                    let candidate = week.checked_add_days(Days::new(u64::from(offset)))?;
                    if candidate > working {
                        return Some(candidate);
                    }
                }
            }
            self.index = 0;
            week = week.checked_add_days(Days::new(7))?;
        }
    }
}
