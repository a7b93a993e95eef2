//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use reminder_mcp::{EngineSettings, ReminderServerHandler};
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (ReminderServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler =
        ReminderServerHandler::new(temp_file.path(), false, EngineSettings::default()).unwrap();
    (handler, temp_file)
}

/// Create a test handler over a data file with the given TOML content
pub fn get_handler_with_content(content: &str) -> (ReminderServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), content).unwrap();
    let handler =
        ReminderServerHandler::new(temp_file.path(), false, EngineSettings::default()).unwrap();
    (handler, temp_file)
}

/// Extract the task ID from an add_task() response
/// Response format: "Task created with ID: <id> (due: ..., importance: ...)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Add a task through the handler and return its ID
pub async fn add(
    handler: &ReminderServerHandler,
    name: &str,
    due_date: &str,
    importance: &str,
) -> String {
    let response = handler
        .handle_add_task(
            name.to_string(),
            due_date.to_string(),
            Some(importance.to_string()),
            None,
        )
        .await
        .unwrap();
    extract_id_from_response(&response)
}
