use chrono::{Datelike, NaiveDate, Weekday};

/// Resolved workday state of a single date
///
/// The override table stores only dates whose state differs from the
/// weekend default; lookups resolve to one of these three variants so that
/// "no row" is an explicit state rather than an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayState {
    /// No override: Saturday and Sunday are holidays, every other day is a workday
    Default,
    /// Enforced workday (compensatory work)
    OverrideWorkday,
    /// Enforced non-workday
    OverrideHoliday,
}

impl DayState {
    /// Whether `date` is a holiday when resolved to this state
    pub fn is_holiday_on(self, date: NaiveDate) -> bool {
        match self {
            DayState::Default => is_weekend(date),
            DayState::OverrideWorkday => false,
            DayState::OverrideHoliday => true,
        }
    }
}

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Read side of the holiday calendar
///
/// Implementations must be pure: the same date always resolves to the same
/// state for the lifetime of the value. Callers take a snapshot of the
/// override table before a classification pass.
pub trait CalendarOracle {
    fn day_state(&self, date: NaiveDate) -> DayState;

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.day_state(date).is_holiday_on(date)
    }

    fn is_workday(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date)
    }
}

impl<T: CalendarOracle + ?Sized> CalendarOracle for &T {
    fn day_state(&self, date: NaiveDate) -> DayState {
        (**self).day_state(date)
    }
}

/// Calendar with no overrides at all
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl CalendarOracle for WeekendCalendar {
    fn day_state(&self, _date: NaiveDate) -> DayState {
        DayState::Default
    }
}
