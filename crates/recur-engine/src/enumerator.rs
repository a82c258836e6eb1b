//! Occurrence enumeration: next, previous and all.
//!
//! All three walk a cursor from the origin (`from`, else `start`) and collect
//! the dates the rule set matches. `next`/`previous` test every candidate with
//! bounds ignored and only stop early once the cursor reaches `end`; `all`
//! enforces bounds on every candidate and requires an `end` to terminate.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::date::format_date;
use crate::error::{RecurError, Result};
use crate::pattern::OccurrencePattern;
use crate::rule_set::RecurrenceRuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
    All,
}

/// Collect occurrences of `set` in `direction`.
///
/// `limit` caps the number of results; `None` means unbounded and is only
/// meaningful for [`Direction::All`], which stops at `end`.
///
/// # Errors
/// - `MissingOrigin` when neither `start` nor `from` is set.
/// - `MissingEnd` for `All` without an `end`.
/// - `StartAfterEnd` when `start` is later than `end`.
pub fn occurrences(
    set: &RecurrenceRuleSet,
    direction: Direction,
    limit: Option<usize>,
) -> Result<Vec<NaiveDate>> {
    let origin = set
        .from_date()
        .or(set.start())
        .ok_or(RecurError::MissingOrigin)?;

    if direction == Direction::All && set.end().is_none() {
        return Err(RecurError::MissingEnd);
    }

    if let (Some(start), Some(end)) = (set.start(), set.end()) {
        if start > end {
            return Err(RecurError::StartAfterEnd);
        }
    }

    let mut dates = Vec::new();
    if direction != Direction::All && limit == Some(0) {
        return Ok(dates);
    }

    // Only the forward sweep of `all` is accelerated.
    let mut pattern = match direction {
        Direction::All => OccurrencePattern::rebuild(set.rules(), set.start()),
        Direction::Next | Direction::Previous => None,
    };
    let accelerated = pattern.is_some();

    let mut cursor = origin;
    if direction == Direction::All && set.matches_date(cursor, true) {
        dates.push(cursor);
    }

    let ignore_bounds = direction != Direction::All;
    while limit.is_none_or(|n| dates.len() < n) {
        if !advance(&mut cursor, direction, pattern.as_mut()) {
            break;
        }

        if set.matches_date(cursor, ignore_bounds) {
            trace!(%cursor, "occurrence");
            dates.push(cursor);
        }

        if set.end().is_some_and(|end| cursor >= end) {
            break;
        }
    }

    debug!(
        ?direction,
        %origin,
        found = dates.len(),
        accelerated,
        "enumeration finished"
    );
    Ok(dates)
}

/// Step the cursor once. Returns `false` at the edge of the representable range.
fn advance(
    cursor: &mut NaiveDate,
    direction: Direction,
    pattern: Option<&mut OccurrencePattern>,
) -> bool {
    let next = match (direction, pattern) {
        (Direction::All, Some(pattern)) => return pattern.next_date(cursor),
        (Direction::All | Direction::Next, _) => cursor.succ_opt(),
        (Direction::Previous, _) => cursor.pred_opt(),
    };

    match next {
        Some(date) => {
            *cursor = date;
            true
        }
        None => false,
    }
}

pub(crate) fn format_all(dates: &[NaiveDate], fmt: &str) -> Result<Vec<String>> {
    dates.iter().map(|d| format_date(*d, fmt)).collect()
}
