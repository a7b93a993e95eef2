//! Reminder MCP Server Library
//!
//! A Model Context Protocol (MCP) server that tracks tasks with due dates and
//! tells you which ones need attention, taking a configurable holiday
//! calendar into account.
//!
//! # Architecture
//!
//! - **MCP Layer**: `ReminderServerHandler` and the `handlers` module
//! - **Engine**: `calendar` (holiday oracle and workday walker) and `reminder`
//!   (due-date classifier and reminder panel aggregation)
//! - **Domain**: `task` - task records and the in-memory store
//! - **Persistence**: `storage` - TOML file storage with optional Git sync
//!
//! # Example
//!
//! ```no_run
//! use reminder_mcp::{EngineSettings, ReminderServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = ReminderServerHandler::new("reminders.toml", false, EngineSettings::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod error;
pub mod formatting;
mod git_ops;
pub mod handlers;
pub mod reminder;
pub mod storage;
pub mod task;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

pub use calendar::{CalendarOracle, DEFAULT_WALK_CEILING, HolidayCalendar, WorkdayWalker};
pub use error::{CalendarError, ClassifyError, TaskError};
pub use git_ops::GitOps;
pub use reminder::{
    AggregateReport, Bucket, DueDateClassifier, OverdueReport, ReminderPanel, Urgency, Verdict,
};
pub use storage::Storage;
pub use task::{Importance, ReminderData, Task, TaskStatus};

/// Default number of workdays completed tasks are kept before cleanup
pub const DEFAULT_RETENTION_WORKDAYS: u32 = 5;

/// Engine knobs taken from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Step ceiling of the backward workday search
    pub walk_ceiling: u32,
    /// Completed tasks are kept for this many workdays
    pub retention_workdays: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            walk_ceiling: DEFAULT_WALK_CEILING,
            retention_workdays: DEFAULT_RETENTION_WORKDAYS,
        }
    }
}

/// MCP Server handler for due-date reminders
///
/// Holds the task list and holiday overrides in memory. Every change is
/// written back to the TOML file and optionally committed to Git.
pub struct ReminderServerHandler {
    pub(crate) data: Mutex<ReminderData>,
    pub(crate) storage: Storage,
    pub(crate) settings: EngineSettings,
}

impl ReminderServerHandler {
    /// Create a new handler, loading (and if needed repairing) the data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (TOML format)
    /// * `sync_git` - Enable automatic Git synchronization
    /// * `settings` - Walk ceiling and retention window
    pub fn new(
        storage_path: impl AsRef<Path>,
        sync_git: bool,
        settings: EngineSettings,
    ) -> Result<Self> {
        let storage = Storage::new(storage_path, sync_git);
        let mut data = storage.load()?;

        let repaired = data.repair_tasks();
        if !repaired.is_empty() {
            storage.save_with_message(&data, &format!("Repair {} task(s)", repaired.len()))?;
        }
        info!(
            path = %storage.file_path().display(),
            tasks = data.tasks.len(),
            overrides = data.holidays.len(),
            "reminder data loaded"
        );

        Ok(Self {
            data: Mutex::new(data),
            storage,
            settings,
        })
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Snapshot of the current data
    pub fn snapshot(&self) -> ReminderData {
        self.data.lock().unwrap().clone()
    }

    /// Save data with a custom commit message
    fn save_data_with_message(&self, message: &str) -> Result<()> {
        let data = self.data.lock().unwrap();
        self.storage.save_with_message(&data, message)?;
        Ok(())
    }
}

impl Drop for ReminderServerHandler {
    fn drop(&mut self) {
        if let Err(e) = self.storage.shutdown() {
            warn!("shutdown git sync failed: {:#}", e);
        }
    }
}

/// Due-date reminder server with a holiday-aware calendar.
///
/// Tasks have a due date and an importance tier (normal, important, urgent).
/// The `reminders` tool groups pending tasks into:
/// - **Needs completion today**: urgent tasks due within a day, or due inside
///   a holiday block while today is one of the last two workdays before it
/// - **Due today** / **Due tomorrow** / **Due day after tomorrow**
///
/// The calendar treats Saturday and Sunday as holidays. Use `set_day`,
/// `toggle_day` or `seed_holidays` to add public holidays and compensatory
/// workdays.
///
/// Task IDs use format: #1, #2, #3. Dates use YYYY-MM-DD.
#[mcp_server]
impl McpServer for ReminderServerHandler {
    /// **Add task**: Track something with a due date.
    /// **Tip**: Leave name empty to use the file name of file_path.
    #[tool]
    async fn add_task(
        &self,
        /// Task name (may be empty when file_path is given)
        name: String,
        /// Due date: YYYY-MM-DD
        due_date: String,
        /// Importance: normal/important/urgent (default: normal)
        importance: Option<String>,
        /// File the task refers to (optional)
        file_path: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(name, due_date, importance, file_path)
            .await
    }

    /// **Update task**: Change name, due date or importance. Omitted fields stay unchanged.
    #[tool]
    async fn update_task(
        &self,
        /// Task ID (e.g., "#3")
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New due date: YYYY-MM-DD (optional)
        due_date: Option<String>,
        /// New importance: normal/important/urgent (optional)
        importance: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(id, name, due_date, importance).await
    }

    /// **Complete task**: Mark a task as done. It drops off the reminders.
    #[tool]
    async fn complete_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_complete_task(id).await
    }

    /// **Restore task**: Move a completed task back to pending.
    #[tool]
    async fn restore_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_restore_task(id).await
    }

    /// **Delete task**: Remove a task permanently.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **List tasks**: Pending tasks by due date, or completed tasks newest first.
    #[tool]
    async fn list_tasks(
        &self,
        /// true to list completed tasks instead of pending ones
        completed: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list_tasks(completed).await
    }

    /// **Task summary**: Pending task count and tasks created today.
    #[tool]
    async fn task_summary(
        &self,
        /// Date to treat as today: YYYY-MM-DD (default: local date)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_task_summary(today).await
    }

    /// **Reminders**: Pending tasks that need attention, grouped by urgency.
    /// **When**: Daily, first thing in the morning.
    #[tool]
    async fn reminders(
        &self,
        /// Date to treat as today: YYYY-MM-DD (default: local date)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_reminders(today).await
    }

    /// **Overdue**: Pending tasks whose due date has passed.
    #[tool]
    async fn overdue(
        &self,
        /// Date to treat as today: YYYY-MM-DD (default: local date)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_overdue(today).await
    }

    /// **Check due date**: Classify a single due date without storing a task.
    #[tool]
    async fn check_due(
        &self,
        /// Due date: YYYY-MM-DD
        due_date: String,
        /// Importance: normal/important/urgent (default: normal)
        importance: Option<String>,
        /// Date to treat as today: YYYY-MM-DD (default: local date)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_check_due(due_date, importance, today).await
    }

    /// **Set day**: Force a date to be a workday (compensatory work) or a holiday.
    /// Setting a date to its default (weekday=workday, weekend=holiday) removes the override.
    #[tool]
    async fn set_day(
        &self,
        /// Date: YYYY-MM-DD
        date: String,
        /// true for a workday, false for a holiday
        workday: bool,
        /// Label, e.g. "National Day" (optional)
        label: Option<String>,
    ) -> McpResult<String> {
        self.handle_set_day(date, workday, label).await
    }

    /// **Toggle day**: Flip a date between workday and holiday.
    #[tool]
    async fn toggle_day(
        &self,
        /// Date: YYYY-MM-DD
        date: String,
    ) -> McpResult<String> {
        self.handle_toggle_day(date).await
    }

    /// **List overrides**: Holiday and compensatory-workday overrides in date order.
    #[tool]
    async fn list_overrides(
        &self,
        /// Year filter (optional)
        year: Option<i32>,
        /// Month filter 1-12, requires year (optional)
        month: Option<u32>,
    ) -> McpResult<String> {
        self.handle_list_overrides(year, month).await
    }

    /// **Day status**: Workday/holiday status of each date in a range.
    #[tool]
    async fn day_status(
        &self,
        /// First date: YYYY-MM-DD
        start: String,
        /// Last date: YYYY-MM-DD (default: same as start)
        end: Option<String>,
    ) -> McpResult<String> {
        self.handle_day_status(start, end).await
    }

    /// **Seed holidays**: Replace a year's overrides with the preset public holidays.
    #[tool]
    async fn seed_holidays(
        &self,
        /// Year, e.g. 2025
        year: i32,
    ) -> McpResult<String> {
        self.handle_seed_holidays(year).await
    }

    /// **Cleanup**: Delete completed tasks older than the retention window (in workdays).
    #[tool]
    async fn cleanup_completed(
        &self,
        /// Date to treat as today: YYYY-MM-DD (default: local date)
        today: Option<String>,
    ) -> McpResult<String> {
        self.handle_cleanup_completed(today).await
    }

    /// **Repair**: Reset tasks whose status and completion time disagree.
    #[tool]
    async fn repair_tasks(&self) -> McpResult<String> {
        self.handle_repair_tasks().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn get_test_handler() -> (ReminderServerHandler, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let handler =
            ReminderServerHandler::new(temp_file.path(), false, EngineSettings::default()).unwrap();
        (handler, temp_file)
    }

    #[test]
    fn test_custom_file_path() {
        let (handler, temp_file) = get_test_handler();
        assert_eq!(handler.storage().file_path(), temp_file.path());
        assert!(handler.snapshot().tasks.is_empty());
    }

    #[test]
    fn test_default_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.walk_ceiling, 366);
        assert_eq!(settings.retention_workdays, 5);
    }

    #[test]
    fn test_load_repairs_inconsistent_tasks() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r##"
task_counter = 1

[[tasks]]
id = "#1"
name = "Half done"
due_date = "2024-03-15"
status = "completed"
created_at = "2024-03-01"
updated_at = "2024-03-01"
"##,
        )
        .unwrap();

        let handler =
            ReminderServerHandler::new(temp_file.path(), false, EngineSettings::default()).unwrap();
        let data = handler.snapshot();
        assert!(data.tasks[0].is_pending());

        // The repair was written back
        let reloaded = Storage::new(temp_file.path(), false).load().unwrap();
        assert!(reloaded.tasks[0].is_pending());
    }
}
