use crate::calendar::{CalendarOracle, DEFAULT_WALK_CEILING, WorkdayWalker};
use crate::error::ClassifyError;
use crate::task::{Importance, parse_date};
use chrono::{Days, NaiveDate};
use std::fmt;
use tracing::debug;

/// How pressing a due date is relative to "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Overdue,
    /// Urgent task that must be finished today because a holiday block follows
    NeedsTodayCompletion,
    DueToday,
    DueTomorrow,
    DueDayAfterTomorrow,
    None,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::NeedsTodayCompletion => "NeedsTodayCompletion",
            Urgency::DueToday => "DueToday",
            Urgency::DueTomorrow => "DueTomorrow",
            Urgency::DueDayAfterTomorrow => "DueDayAfterTomorrow",
            Urgency::None => "None",
        }
    }

    /// Human-readable message for the urgency
    pub fn message(self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::NeedsTodayCompletion => "needs completion today",
            Urgency::DueToday => "due today",
            Urgency::DueTomorrow => "due tomorrow",
            Urgency::DueDayAfterTomorrow => "due the day after tomorrow",
            Urgency::None => "no reminder",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub needs_reminder: bool,
    pub urgency: Urgency,
}

impl Verdict {
    pub fn reminder(urgency: Urgency) -> Self {
        Self {
            needs_reminder: true,
            urgency,
        }
    }

    pub fn none() -> Self {
        Self {
            needs_reminder: false,
            urgency: Urgency::None,
        }
    }
}

impl From<Verdict> for (bool, Urgency) {
    fn from(v: Verdict) -> Self {
        (v.needs_reminder, v.urgency)
    }
}

/// Maps (due date, importance, today) to a reminder verdict
///
/// "Today" is always passed in; the classifier never reads the clock.
#[derive(Debug, Clone, Copy)]
pub struct DueDateClassifier<O> {
    walker: WorkdayWalker<O>,
}

impl<O: CalendarOracle> DueDateClassifier<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_ceiling(oracle, DEFAULT_WALK_CEILING)
    }

    pub fn with_ceiling(oracle: O, walk_ceiling: u32) -> Self {
        Self {
            walker: WorkdayWalker::with_ceiling(oracle, walk_ceiling),
        }
    }

    pub fn oracle(&self) -> &O {
        self.walker.oracle()
    }

    /// Classify a due date
    ///
    /// Rules are evaluated in order, first match wins:
    /// 1. urgent task due inside a holiday block: needs completion on the
    ///    last two workdays before the block
    /// 2. urgent task due within two days
    /// 3. overdue
    /// 4. due within two days; the two-day reminder is skipped when the due
    ///    date is a holiday
    ///
    /// # Errors
    /// `ClassifyError::Calendar` when the workday search exceeds its ceiling.
    pub fn classify(
        &self,
        due_date: NaiveDate,
        importance: Importance,
        today: NaiveDate,
    ) -> Result<Verdict, ClassifyError> {
        let days_left = (due_date - today).num_days();

        if importance == Importance::Urgent {
            if self.in_holiday_block(due_date) {
                let last = self.walker.last_workday_before(due_date)?;
                let second_last = self.walker.last_workday_before(last)?;
                debug!(%due_date, %last, %second_last, %today, "urgent task due in holiday block");
                if second_last <= today && today <= last {
                    return Ok(Verdict::reminder(Urgency::NeedsTodayCompletion));
                }
            }

            match days_left {
                0 => return Ok(Verdict::reminder(Urgency::DueToday)),
                1 => return Ok(Verdict::reminder(Urgency::DueTomorrow)),
                2 => return Ok(Verdict::reminder(Urgency::DueDayAfterTomorrow)),
                _ => {}
            }
        }

        if due_date < today {
            return Ok(Verdict::reminder(Urgency::Overdue));
        }

        let verdict = match days_left {
            0 => Verdict::reminder(Urgency::DueToday),
            1 => Verdict::reminder(Urgency::DueTomorrow),
            2 if !self.oracle().is_holiday(due_date) => {
                Verdict::reminder(Urgency::DueDayAfterTomorrow)
            }
            _ => Verdict::none(),
        };
        Ok(verdict)
    }

    /// Classify a stored YYYY-MM-DD due date
    pub fn classify_raw(
        &self,
        due_date: &str,
        importance: Importance,
        today: NaiveDate,
    ) -> Result<Verdict, ClassifyError> {
        self.classify(parse_date(due_date)?, importance, today)
    }

    /// A due date is inside a holiday block when it, or the day before it, is a holiday
    fn in_holiday_block(&self, due_date: NaiveDate) -> bool {
        self.oracle().is_holiday(due_date)
            || due_date
                .checked_sub_days(Days::new(1))
                .is_some_and(|prev| self.oracle().is_holiday(prev))
    }
}
