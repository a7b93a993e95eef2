//! Error taxonomy for the reminder engine
//!
//! Calendar lookups, due-date classification and task boundary checks each
//! have their own error type so callers can tell a bad record apart from a
//! broken calendar configuration.

use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised while resolving workdays
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The backward walk ran past its step ceiling without finding a workday.
    ///
    /// This is a configuration fault (e.g. a whole year marked as holiday),
    /// not an ordinary lookup miss.
    #[error(
        "no workday found within {ceiling} day(s) before {from}; check the holiday overrides for an unbroken holiday run"
    )]
    WorkdaySearchExhausted { from: NaiveDate, ceiling: u32 },

    #[error("date arithmetic overflowed while stepping back from {0}")]
    OutOfRange(NaiveDate),
}

/// Failures raised while classifying a single task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ClassifyError {
    /// True for faults that affect every lookup, not just one record
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, ClassifyError::Calendar(_))
    }
}

/// Failures raised at the task boundary (creation, update, state changes)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid importance '{0}'. Valid options are: normal, important, urgent")]
    InvalidImportance(String),

    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Task '{0}' not found")]
    NotFound(String),

    #[error("Task '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("Task '{0}' is not completed")]
    NotCompleted(String),
}
