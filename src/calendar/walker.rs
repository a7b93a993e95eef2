use super::oracle::CalendarOracle;
use crate::error::CalendarError;
use chrono::{Days, NaiveDate};
use tracing::error;

/// Default step ceiling: one leap year of consecutive holidays
pub const DEFAULT_WALK_CEILING: u32 = 366;

/// Walks backward through a calendar to find preceding workdays
///
/// The walk is bounded by `ceiling` days; a calendar whose holiday run is
/// longer than that is reported as `CalendarError::WorkdaySearchExhausted`.
#[derive(Debug, Clone, Copy)]
pub struct WorkdayWalker<O> {
    oracle: O,
    ceiling: u32,
}

impl<O: CalendarOracle> WorkdayWalker<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_ceiling(oracle, DEFAULT_WALK_CEILING)
    }

    pub fn with_ceiling(oracle: O, ceiling: u32) -> Self {
        Self {
            oracle,
            ceiling: ceiling.max(1),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Latest workday strictly before `date`
    pub fn last_workday_before(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let mut current = date;
        for _ in 0..self.ceiling {
            current = current
                .checked_sub_days(Days::new(1))
                .ok_or(CalendarError::OutOfRange(current))?;
            if !self.oracle.is_holiday(current) {
                return Ok(current);
            }
        }
        Err(CalendarError::WorkdaySearchExhausted {
            from: date,
            ceiling: self.ceiling,
        })
    }

    /// Like `last_workday_before`, degrading to `date - 1 day` on failure
    ///
    /// The failure is logged at error level before the fallback is returned.
    pub fn last_workday_before_or_fallback(&self, date: NaiveDate) -> NaiveDate {
        match self.last_workday_before(date) {
            Ok(day) => day,
            Err(e) => {
                let fallback = date.pred_opt().unwrap_or(date);
                error!(%date, %fallback, "workday lookup failed, using previous day: {}", e);
                fallback
            }
        }
    }

    /// The `n`-th workday before `date` (`n = 1` is the last workday)
    pub fn nth_workday_before(&self, date: NaiveDate, n: u32) -> Result<NaiveDate, CalendarError> {
        let mut current = date;
        for _ in 0..n {
            current = self.last_workday_before(current)?;
        }
        Ok(current)
    }
}
