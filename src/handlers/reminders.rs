//! Reminder handlers: single classification, the panel and the overdue listing

use crate::ReminderServerHandler;
use crate::formatting;
use crate::reminder::{self, DueDateClassifier};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::error;

impl ReminderServerHandler {
    pub async fn handle_check_due(
        &self,
        due_date: String,
        importance: Option<String>,
        today: Option<String>,
    ) -> McpResult<String> {
        let due = validation::parse_date_param(&due_date)?;
        let importance = validation::parse_importance_or_default(importance)?;
        let today = validation::parse_today(today)?;

        let calendar = self.data.lock().unwrap().holidays.clone();
        let classifier = DueDateClassifier::with_ceiling(&calendar, self.settings.walk_ceiling);
        match classifier.classify(due, importance, today) {
            Ok(verdict) => Ok(formatting::format_verdict(due, importance, verdict)),
            Err(e) => {
                if e.is_configuration_fault() {
                    error!("holiday calendar misconfigured: {}", e);
                }
                bail_public!(_, "Cannot classify {}: {}", due, e);
            }
        }
    }

    /// Render the reminder panel for all pending tasks.
    pub async fn handle_reminders(&self, today: Option<String>) -> McpResult<String> {
        let today = validation::parse_today(today)?;

        let data = self.data.lock().unwrap().clone();
        let classifier = DueDateClassifier::with_ceiling(&data.holidays, self.settings.walk_ceiling);
        let report = reminder::aggregate(&classifier, &data.tasks, today);
        Ok(formatting::format_panel(&report))
    }

    pub async fn handle_overdue(&self, today: Option<String>) -> McpResult<String> {
        let today = validation::parse_today(today)?;

        let data = self.data.lock().unwrap().clone();
        let classifier = DueDateClassifier::with_ceiling(&data.holidays, self.settings.walk_ceiling);
        let report = reminder::overdue(&classifier, &data.tasks, today);
        Ok(formatting::format_overdue(&report, today))
    }
}
