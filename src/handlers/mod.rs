//! MCP tool handlers, grouped by the area they touch

pub mod calendar;
pub mod housekeeping;
pub mod reminders;
pub mod tasks;
