//! Error types for recur-engine operations.

use thiserror::Error;

/// The two classes of caller-input failure.
///
/// Neither class is ever retried internally; a rule set that raised an error
/// is left exactly as it was before the failing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input itself is malformed or out of range.
    Validation,
    /// The input is fine, but the rule set is not in a state that allows the call.
    Precondition,
}

#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Intervals must be greater than zero")]
    InvalidInterval,

    #[error("Value should be in range {low} to {high}")]
    OutOfRange { measure: String, low: u32, high: u32 },

    #[error("Invalid units: {0}")]
    InvalidUnits(String),

    #[error("Invalid measure provided: {0}")]
    InvalidMeasure(String),

    #[error("weeksOfMonthByDay must be combined with daysOfWeek")]
    WeekdayRequired,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Must have a start date set to set an interval!")]
    MissingStart,

    #[error("Cannot get occurrences without start or from date.")]
    MissingOrigin,

    #[error("Cannot get all occurrences without an end date.")]
    MissingEnd,

    #[error("Start date cannot be later than end date.")]
    StartAfterEnd,
}

impl RecurError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecurError::MissingStart
            | RecurError::MissingOrigin
            | RecurError::MissingEnd
            | RecurError::StartAfterEnd => ErrorKind::Precondition,
            _ => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecurError>;
