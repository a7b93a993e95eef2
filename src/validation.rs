//! Parameter validation for the MCP tool surface
//!
//! Tool arguments arrive as strings; these helpers turn them into engine
//! types or an `INVALID_PARAMS` error the client can read.

use crate::task::{Importance, local_date_today, parse_date};
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse a YYYY-MM-DD parameter
pub fn parse_date_param(date_str: &str) -> McpResult<NaiveDate> {
    parse_date(date_str).map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            date_str
        ))
    })
}

/// Parse an optional "today" override; an absent or blank value means the local date
pub fn parse_today(today: Option<String>) -> McpResult<NaiveDate> {
    match today.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse_date_param(s),
        _ => Ok(local_date_today()),
    }
}

/// Parse an optional date parameter, treating blank as absent
pub fn parse_optional_date(date_str: Option<String>) -> McpResult<Option<NaiveDate>> {
    match date_str.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse_date_param(s).map(Some),
        _ => Ok(None),
    }
}

/// Parse an importance tier; accepts the English names and the legacy labels
pub fn parse_importance(importance: &str) -> McpResult<Importance> {
    importance
        .parse::<Importance>()
        .map_err(|e| invalid_params(e.to_string()))
}

/// Parse an optional importance, defaulting to `Normal`
pub fn parse_importance_or_default(importance: Option<String>) -> McpResult<Importance> {
    match importance.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => parse_importance(s),
        _ => Ok(Importance::default()),
    }
}

/// Validate the year/month filter of `list_overrides`
pub fn parse_year_month(year: Option<i32>, month: Option<u32>) -> McpResult<(Option<i32>, Option<u32>)> {
    if let Some(m) = month
        && !(1..=12).contains(&m)
    {
        return Err(invalid_params(format!(
            "Invalid month {}. Use a value from 1 to 12",
            m
        )));
    }
    if month.is_some() && year.is_none() {
        return Err(invalid_params(
            "A month filter requires a year".to_string(),
        ));
    }
    Ok((year, month))
}

/// Normalize a task ID: trim it and add the `#` prefix when missing
///
/// # Examples
/// ```
/// # use reminder_mcp::validation::normalize_task_id;
/// assert_eq!(normalize_task_id(" 3 "), "#3");
/// assert_eq!(normalize_task_id("#3"), "#3");
/// ```
pub fn normalize_task_id(task_id: &str) -> String {
    let id = task_id.trim();
    if id.starts_with('#') {
        id.to_string()
    } else {
        format!("#{}", id)
    }
}
