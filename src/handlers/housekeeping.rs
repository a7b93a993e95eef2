//! Data maintenance handlers

use crate::ReminderServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl ReminderServerHandler {
    /// Purge completed tasks outside the retention window.
    pub async fn handle_cleanup_completed(&self, today: Option<String>) -> McpResult<String> {
        let today = validation::parse_today(today)?;
        let retention = self.settings.retention_workdays;

        let mut data = self.data.lock().unwrap();
        let removed = data.cleanup_completed(today, retention, self.settings.walk_ceiling);
        drop(data);

        if removed == 0 {
            return Ok(format!(
                "No completed tasks older than {} workday(s)",
                retention
            ));
        }

        if let Err(e) =
            self.save_data_with_message(&format!("Clean up {} completed task(s)", removed))
        {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Removed {} completed task(s) older than {} workday(s)",
            removed, retention
        ))
    }

    pub async fn handle_repair_tasks(&self) -> McpResult<String> {
        let mut data = self.data.lock().unwrap();
        let repaired = data.repair_tasks();
        drop(data);

        if repaired.is_empty() {
            return Ok("All tasks are consistent".to_string());
        }

        if let Err(e) =
            self.save_data_with_message(&format!("Repair {} task(s)", repaired.len()))
        {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!(
            "Reset {} task(s) to pending: {}",
            repaired.len(),
            repaired.join(", ")
        ))
    }
}
