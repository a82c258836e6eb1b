//! Date-only values and the calendar projections the matchers need.
//!
//! Dates are `chrono::NaiveDate`: no time of day, no offset. Anything carrying
//! a time or a timezone is collapsed to its own wall-clock calendar date before
//! a rule ever sees it, so comparisons are timezone-independent.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Days, Month, Months, NaiveDate, NaiveDateTime, TimeZone, Weekday};

use crate::error::{RecurError, Result};

/// Canonical string form used by snapshots.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

const INPUT_FORMATS: [&str; 2] = [ISO_FORMAT, "%m/%d/%Y"];

/// Collapse a date-like value to a pure calendar date.
pub trait IntoDateOnly {
    fn into_date_only(self) -> Result<NaiveDate>;
}

impl IntoDateOnly for NaiveDate {
    fn into_date_only(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoDateOnly for &NaiveDate {
    fn into_date_only(self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl IntoDateOnly for NaiveDateTime {
    fn into_date_only(self) -> Result<NaiveDate> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> IntoDateOnly for DateTime<Tz> {
    fn into_date_only(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl<Tz: TimeZone> IntoDateOnly for &DateTime<Tz> {
    fn into_date_only(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl IntoDateOnly for &str {
    fn into_date_only(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

impl IntoDateOnly for String {
    fn into_date_only(self) -> Result<NaiveDate> {
        parse_date(&self)
    }
}

impl IntoDateOnly for &String {
    fn into_date_only(self) -> Result<NaiveDate> {
        parse_date(self)
    }
}

/// Parse `YYYY-MM-DD`, `MM/DD/YYYY`, an RFC 3339 timestamp, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp into a date-only value.
///
/// Timestamps keep the calendar date of their own offset.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    for fmt in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| RecurError::InvalidDate(input.to_string()))
}

/// Render a date with a strftime format string.
///
/// Specifiers that do not apply to a date (e.g. `%H`) and malformed
/// specifiers are reported instead of panicking.
pub fn format_date(date: NaiveDate, fmt: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(fmt).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(RecurError::InvalidFormat(fmt.to_string()));
    }

    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.into_iter()))
        .map_err(|_| RecurError::InvalidFormat(fmt.to_string()))?;
    Ok(out)
}

/// Resolve an English weekday name (`"Sunday"`, `"sun"`) to 0 (Sunday) .. 6.
pub fn weekday_number(name: &str) -> Option<u32> {
    name.trim()
        .parse::<Weekday>()
        .ok()
        .map(|wd| wd.num_days_from_sunday())
}

/// Resolve an English month name (`"January"`, `"jan"`) to 0 .. 11.
pub fn month_number(name: &str) -> Option<u32> {
    name.trim()
        .parse::<Month>()
        .ok()
        .map(|m| m.number_from_month() - 1)
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Calendar projections over a date-only value. Weeks start on Sunday.
pub trait CalendarFields {
    /// 0 = Sunday .. 6 = Saturday.
    fn day_of_week(&self) -> u32;

    /// 0 = January .. 11 = December.
    fn month_of_year(&self) -> u32;

    /// Number of the last day of this date's month (28..=31).
    fn last_day_of_month(&self) -> u32;

    /// Zero-indexed count of week starts between the week containing the 1st
    /// of the month and the week containing this date.
    fn week_of_month(&self) -> u32;

    /// Zero-indexed occurrence of this weekday within the month: 0 for the
    /// first Sunday of the month, 1 for the second, and so on.
    fn week_of_month_by_weekday(&self) -> u32;

    /// Week of the year. Week 1 is the week containing 1 January; the last
    /// days of December that share a week with the following 1 January are
    /// also week 1.
    fn week_of_year(&self) -> u32;
}

impl CalendarFields for NaiveDate {
    fn day_of_week(&self) -> u32 {
        self.weekday().num_days_from_sunday()
    }

    fn month_of_year(&self) -> u32 {
        self.month0()
    }

    fn last_day_of_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    fn week_of_month(&self) -> u32 {
        // Weekday of the 1st is how far the month's first week start lies
        // before the 1st.
        let first_weekday = (self.day_of_week() + 7 - self.day0() % 7) % 7;
        (self.day0() + first_weekday) / 7
    }

    fn week_of_month_by_weekday(&self) -> u32 {
        let weeks = self.week_of_month();
        // Stepping back `weeks` weeks lands in the first calendar week; if that
        // is in the previous month the leading week was partial for this weekday.
        if self.day0() >= weeks * 7 {
            weeks
        } else {
            weeks - 1
        }
    }

    fn week_of_year(&self) -> u32 {
        let year_len: u32 = if is_leap_year(self.year()) { 366 } else { 365 };
        let weekday = self.day_of_week();
        let ordinal0 = self.ordinal0();

        let days_to_next_year = year_len - ordinal0;
        let next_year_weekday = (weekday + days_to_next_year) % 7;
        if next_year_weekday >= days_to_next_year {
            return 1;
        }

        let jan1_weekday = (weekday + 7 - ordinal0 % 7) % 7;
        (ordinal0 + jan1_weekday) / 7 + 1
    }
}

/// The Sunday on or before `date`.
pub(crate) fn start_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.day_of_week())))
}

/// First day of the month after `date`'s month.
pub(crate) fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

/// Shift by a signed number of months, clamping to the end of the target month.
pub(crate) fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
