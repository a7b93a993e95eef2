//! Holiday calendar
//!
//! - `oracle`: workday/holiday resolution (`CalendarOracle`, `DayState`)
//! - `overrides`: the override table with its storage-minimality rule
//! - `walker`: bounded backward search for preceding workdays

mod oracle;
mod overrides;
mod walker;

pub use oracle::{CalendarOracle, DayState, WeekendCalendar, is_weekend};
pub use overrides::{
    COMPENSATORY_LABEL, HOLIDAY_LABEL, HolidayCalendar, HolidayOverride, SetDayOutcome,
};
pub use walker::{DEFAULT_WALK_CEILING, WorkdayWalker};
