//! Task domain
//!
//! - `model`: `Task`, `Importance`, `TaskStatus` and date helpers
//! - `store`: `ReminderData`, the persisted collection of tasks and overrides

mod model;
mod store;

pub use model::{
    DATE_FORMAT, Importance, Task, TaskStatus, local_date_today, local_now, parse_date,
};
pub use store::{FORMAT_VERSION, ReminderData};
