use super::model::{Importance, Task, TaskStatus};
use crate::calendar::{HolidayCalendar, WorkdayWalker};
use crate::error::TaskError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Current version of the TOML data file layout
pub const FORMAT_VERSION: u32 = 1;

/// Everything the reminder server persists: tasks plus the holiday overrides
///
/// Tasks are kept in a Vec so the TOML file has a stable order and the
/// reminder panel can list tasks in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderData {
    #[serde(default = "default_format_version")]
    pub format_version: u32,

    /// Counter for generating unique task IDs
    #[serde(default)]
    pub task_counter: u32,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub holidays: HolidayCalendar,
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

impl Default for ReminderData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            task_counter: 0,
            tasks: Vec::new(),
            holidays: HolidayCalendar::new(),
        }
    }
}

impl ReminderData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique task ID
    pub fn generate_task_id(&mut self) -> String {
        loop {
            self.task_counter += 1;
            let id = format!("#{}", self.task_counter);
            if self.find_task(&id).is_none() {
                return id;
            }
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Create and store a pending task, returning its ID
    pub fn add_task(
        &mut self,
        name: &str,
        due_date: NaiveDate,
        importance: Importance,
        file_path: Option<String>,
        today: NaiveDate,
    ) -> Result<String, TaskError> {
        let id = self.generate_task_id();
        let task = Task::new(id.clone(), name, due_date, importance, file_path, today)?;
        self.tasks.push(task);
        Ok(id)
    }

    /// Update name, due date and importance of a task; `None` leaves a field unchanged
    pub fn update_task(
        &mut self,
        id: &str,
        name: Option<&str>,
        due_date: Option<NaiveDate>,
        importance: Option<Importance>,
        today: NaiveDate,
    ) -> Result<&Task, TaskError> {
        let task = self
            .find_task_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        if let Some(name) = name {
            task.rename(name)?;
        }
        if let Some(due) = due_date {
            task.set_due(due);
        }
        if let Some(importance) = importance {
            task.importance = importance;
        }
        task.updated_at = today;
        Ok(task)
    }

    pub fn complete_task(&mut self, id: &str, at: NaiveDateTime) -> Result<(), TaskError> {
        self.find_task_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?
            .complete(at)
    }

    pub fn restore_task(&mut self, id: &str, today: NaiveDate) -> Result<(), TaskError> {
        self.find_task_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?
            .restore(today)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task, TaskError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        Ok(self.tasks.remove(pos))
    }

    /// Pending tasks in insertion order
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_pending()).collect()
    }

    /// Pending tasks ordered by due date; unparseable dates sort last
    pub fn pending_by_due_date(&self) -> Vec<&Task> {
        let mut tasks = self.pending_tasks();
        tasks.sort_by_key(|t| (t.due().is_err(), t.due().ok()));
        tasks
    }

    /// Completed tasks, most recently completed first
    pub fn completed_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Completed)
            .collect();
        tasks.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
        tasks
    }

    /// Number of pending tasks created on `today`
    pub fn created_on_count(&self, today: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.is_pending() && t.created_at == today)
            .count()
    }

    /// Reset every task whose status and completion time disagree
    ///
    /// Returns the IDs of the repaired tasks.
    pub fn repair_tasks(&mut self) -> Vec<String> {
        let repaired: Vec<String> = self
            .tasks
            .iter_mut()
            .filter_map(|t| t.repair().then(|| t.id.clone()))
            .collect();
        for id in &repaired {
            warn!(task = %id, "status and completion time disagreed, task reset to pending");
        }
        repaired
    }

    /// Purge completed tasks older than the retention window
    ///
    /// A completed task is removed when its completion date is earlier than
    /// the `retention_workdays`-th workday before `today`.
    pub fn cleanup_completed(
        &mut self,
        today: NaiveDate,
        retention_workdays: u32,
        walk_ceiling: u32,
    ) -> usize {
        let walker = WorkdayWalker::with_ceiling(&self.holidays, walk_ceiling);
        let cutoff = match walker.nth_workday_before(today, retention_workdays) {
            Ok(day) => day,
            Err(e) => {
                warn!("retention cutoff lookup failed, keeping completed tasks: {}", e);
                return 0;
            }
        };

        let before = self.tasks.len();
        self.tasks.retain(|t| {
            t.completed_at()
                .is_none_or(|completed| completed.date() >= cutoff)
        });
        let removed = before - self.tasks.len();
        info!(%cutoff, removed, "cleaned up completed tasks");
        removed
    }
}
