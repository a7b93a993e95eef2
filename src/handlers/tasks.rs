//! Task management handlers

use crate::ReminderServerHandler;
use crate::formatting;
use crate::task::local_now;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl ReminderServerHandler {
    /// Add a pending task. A blank name falls back to the file name of `file_path`.
    pub async fn handle_add_task(
        &self,
        name: String,
        due_date: String,
        importance: Option<String>,
        file_path: Option<String>,
    ) -> McpResult<String> {
        let due = validation::parse_date_param(&due_date)?;
        let importance = validation::parse_importance_or_default(importance)?;
        let file_path = file_path.filter(|p| !p.trim().is_empty());
        let today = validation::parse_today(None)?;

        let mut data = self.data.lock().unwrap();
        let id = match data.add_task(&name, due, importance, file_path, today) {
            Ok(id) => id,
            Err(e) => {
                drop(data);
                bail_public!(_, "{}", e);
            }
        };
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Add task {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Task created with ID: {} (due: {}, importance: {})",
            id, due, importance
        ))
    }

    /// Update name, due date or importance; omitted fields stay unchanged.
    pub async fn handle_update_task(
        &self,
        id: String,
        name: Option<String>,
        due_date: Option<String>,
        importance: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);
        let due = validation::parse_optional_date(due_date)?;
        let importance = match importance.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(validation::parse_importance(s)?),
            _ => None,
        };
        let today = validation::parse_today(None)?;

        let mut data = self.data.lock().unwrap();
        let updated = data
            .update_task(&id, name.as_deref(), due, importance, today)
            .map(|task| {
                format!(
                    "Task {} updated: {} (due: {}, importance: {})",
                    task.id, task.name, task.due_date, task.importance
                )
            });
        let summary = match updated {
            Ok(summary) => summary,
            Err(e) => {
                drop(data);
                bail_public!(_, "{}", e);
            }
        };
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Update task {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(summary)
    }

    pub async fn handle_complete_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);

        let mut data = self.data.lock().unwrap();
        if let Err(e) = data.complete_task(&id, local_now()) {
            drop(data);
            bail_public!(_, "{}", e);
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Complete task {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Task {} marked as completed", id))
    }

    pub async fn handle_restore_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);
        let today = validation::parse_today(None)?;

        let mut data = self.data.lock().unwrap();
        if let Err(e) = data.restore_task(&id, today) {
            drop(data);
            bail_public!(_, "{}", e);
        }
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Restore task {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Task {} restored to pending", id))
    }

    pub async fn handle_delete_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_task_id(&id);

        let mut data = self.data.lock().unwrap();
        let removed = match data.delete_task(&id) {
            Ok(task) => task,
            Err(e) => {
                drop(data);
                bail_public!(_, "{}", e);
            }
        };
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Delete task {}", id)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Task {} ({}) deleted", id, removed.name))
    }

    /// Pending tasks by due date, or completed tasks newest first.
    pub async fn handle_list_tasks(&self, completed: Option<bool>) -> McpResult<String> {
        let data = self.data.lock().unwrap();
        let text = if completed.unwrap_or(false) {
            formatting::format_tasks(&data.completed_tasks())
        } else {
            formatting::format_tasks(&data.pending_by_due_date())
        };
        drop(data);
        Ok(text)
    }

    pub async fn handle_task_summary(&self, today: Option<String>) -> McpResult<String> {
        let today = validation::parse_today(today)?;

        let data = self.data.lock().unwrap();
        let pending = data.pending_tasks().len();
        let created_today = data.created_on_count(today);
        drop(data);

        Ok(format!(
            "Pending tasks: {}\nCreated today ({}): {}",
            pending, today, created_today
        ))
    }
}
