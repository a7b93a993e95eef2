use super::oracle::{CalendarOracle, DayState, is_weekend};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Label stored for compensatory workdays when none is given
pub const COMPENSATORY_LABEL: &str = "Compensatory";
/// Label stored for holidays when none is given
pub const HOLIDAY_LABEL: &str = "Holiday";

/// A row of the override table
///
/// `is_workday = true` forces a workday, `false` forces a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayOverride {
    pub date: NaiveDate,
    pub is_workday: bool,
    pub label: String,
}

impl HolidayOverride {
    pub fn state(&self) -> DayState {
        if self.is_workday {
            DayState::OverrideWorkday
        } else {
            DayState::OverrideHoliday
        }
    }

    /// True when this row only restates the weekend default
    pub fn is_redundant(&self) -> bool {
        self.is_workday != is_weekend(self.date)
    }
}

/// What `HolidayCalendar::set_day` did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDayOutcome {
    /// A row was inserted or updated
    Stored,
    /// The requested state is the default; any existing row was removed
    ClearedToDefault,
}

/// The holiday override table, keyed by date
///
/// Holds only non-default rows: every mutation goes through `set_day`, which
/// deletes instead of storing a row that matches the weekend default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HolidayOverride>", into = "Vec<HolidayOverride>")]
pub struct HolidayCalendar {
    overrides: BTreeMap<NaiveDate, HolidayOverride>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HolidayOverride> {
        self.overrides.get(&date)
    }

    /// Force `date` to be a workday (`true`) or a holiday (`false`)
    ///
    /// # Arguments
    /// * `date` - Date to change
    /// * `is_workday` - Requested state
    /// * `label` - Display name; defaults to "Compensatory" / "Holiday"
    pub fn set_day(
        &mut self,
        date: NaiveDate,
        is_workday: bool,
        label: Option<&str>,
    ) -> SetDayOutcome {
        if is_workday != is_weekend(date) {
            if self.overrides.remove(&date).is_some() {
                debug!(%date, "override removed, date back to default");
            }
            return SetDayOutcome::ClearedToDefault;
        }

        let label = match label {
            Some(l) if !l.trim().is_empty() => l.trim().to_string(),
            _ if is_workday => COMPENSATORY_LABEL.to_string(),
            _ => HOLIDAY_LABEL.to_string(),
        };
        self.overrides.insert(
            date,
            HolidayOverride {
                date,
                is_workday,
                label,
            },
        );
        SetDayOutcome::Stored
    }

    /// Flip the effective state of `date`, returning the new holiday flag
    pub fn toggle_day(&mut self, date: NaiveDate) -> bool {
        let now_holiday = !self.is_holiday(date);
        self.set_day(date, !now_holiday, None);
        now_holiday
    }

    /// Remove every override in `year`, returning how many were removed
    pub fn clear_year(&mut self, year: i32) -> usize {
        let before = self.overrides.len();
        self.overrides.retain(|date, _| date.year() != year);
        before - self.overrides.len()
    }

    /// Overrides in date order, optionally restricted to a year and month
    pub fn overrides(&self, year: Option<i32>, month: Option<u32>) -> Vec<&HolidayOverride> {
        self.overrides
            .values()
            .filter(|o| year.is_none_or(|y| o.date.year() == y))
            .filter(|o| month.is_none_or(|m| o.date.month() == m))
            .collect()
    }
}

impl CalendarOracle for HolidayCalendar {
    fn day_state(&self, date: NaiveDate) -> DayState {
        self.overrides
            .get(&date)
            .map_or(DayState::Default, HolidayOverride::state)
    }
}

impl From<Vec<HolidayOverride>> for HolidayCalendar {
    /// Rebuild the table from stored rows; later rows win and redundant rows are dropped
    fn from(rows: Vec<HolidayOverride>) -> Self {
        let mut calendar = HolidayCalendar::new();
        for row in rows {
            calendar.set_day(row.date, row.is_workday, Some(&row.label));
        }
        calendar
    }
}

impl From<HolidayCalendar> for Vec<HolidayOverride> {
    fn from(calendar: HolidayCalendar) -> Self {
        calendar.overrides.into_values().collect()
    }
}

/// Fixed-date holiday presets installed by `seed_year`
const PRESET_HOLIDAYS: &[(u32, u32, u32, &str)] = &[
    (1, 1, 1, "New Year's Day"),
    (2, 10, 16, "Spring Festival"),
    (4, 4, 5, "Qingming Festival"),
    (5, 1, 5, "Labour Day"),
    (6, 22, 24, "Dragon Boat Festival"),
    (9, 29, 30, "Mid-Autumn Festival"),
    (10, 1, 7, "National Day"),
];

impl HolidayCalendar {
    /// Replace the overrides of `year` with the preset holiday list
    ///
    /// Returns the number of rows stored. Preset dates that already fall on a
    /// weekend need no row and are skipped.
    pub fn seed_year(&mut self, year: i32) -> usize {
        self.clear_year(year);
        let mut stored = 0;
        for &(month, first, last, label) in PRESET_HOLIDAYS {
            for day in first..=last {
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    continue;
                };
                if self.set_day(date, false, Some(label)) == SetDayOutcome::Stored {
                    stored += 1;
                }
            }
        }
        stored
    }
}
