//! Due-date reminders
//!
//! - `classifier`: per-task urgency verdicts (`DueDateClassifier`)
//! - `aggregator`: the bucketed reminder panel and the overdue listing

mod aggregator;
mod classifier;

pub use aggregator::{
    AggregateReport, Bucket, OverdueReport, ReminderPanel, SkippedTask, TaskView, aggregate,
    overdue,
};
pub use classifier::{DueDateClassifier, Urgency, Verdict};
