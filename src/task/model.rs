use crate::error::{ClassifyError, TaskError};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Date format used for due dates everywhere (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get the current local date and time
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(value: &str) -> Result<NaiveDate, ClassifyError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ClassifyError::InvalidDate {
        value: value.to_string(),
    })
}

/// Importance tier of a task
///
/// Only `Urgent` changes classification rules; the other tiers affect display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    #[default]
    Normal,
    Important,
    Urgent,
}

impl Importance {
    pub fn as_str(self) -> &'static str {
        match self {
            Importance::Normal => "normal",
            Importance::Important => "important",
            Importance::Urgent => "urgent",
        }
    }

    /// Star rating shown in task listings
    pub fn stars(self) -> &'static str {
        match self {
            Importance::Normal => "★",
            Importance::Important => "★★★",
            Importance::Urgent => "★★★★★",
        }
    }

    /// `★` for urgent tasks, `•` otherwise
    pub fn marker(self) -> &'static str {
        match self {
            Importance::Urgent => "★",
            Importance::Normal | Importance::Important => "•",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "普通" => Ok(Importance::Normal),
            "important" | "重要" => Ok(Importance::Important),
            "urgent" | "紧急" => Ok(Importance::Urgent),
            _ => Err(TaskError::InvalidImportance(s.to_string())),
        }
    }
}

/// Lifecycle state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

/// A task with a due date
///
/// `completed_at` is set exactly when `status` is `Completed`; the state
/// transition methods keep the two in step. The due date is kept as the
/// stored text and parsed on use, so a hand-edited data file with a bad date
/// still loads and only that task fails classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub due_date: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<NaiveDateTime>,
    /// Optional file the task refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl Task {
    /// Create a pending task
    ///
    /// When `name` is blank the stem of `file_path` is used instead; a task
    /// with neither is rejected.
    pub fn new(
        id: impl Into<String>,
        name: &str,
        due_date: NaiveDate,
        importance: Importance,
        file_path: Option<String>,
        today: NaiveDate,
    ) -> Result<Self, TaskError> {
        let name = resolve_name(name, file_path.as_deref())?;
        Ok(Self {
            id: id.into(),
            name,
            due_date: due_date.format(DATE_FORMAT).to_string(),
            importance,
            status: TaskStatus::Pending,
            completed_at: None,
            file_path,
            created_at: today,
            updated_at: today,
        })
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Parsed due date
    pub fn due(&self) -> Result<NaiveDate, ClassifyError> {
        parse_date(&self.due_date)
    }

    pub fn set_due(&mut self, due_date: NaiveDate) {
        self.due_date = due_date.format(DATE_FORMAT).to_string();
    }

    pub fn rename(&mut self, name: &str) -> Result<(), TaskError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskError::EmptyName);
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn complete(&mut self, at: NaiveDateTime) -> Result<(), TaskError> {
        if self.status == TaskStatus::Completed {
            return Err(TaskError::AlreadyCompleted(self.id.clone()));
        }
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        self.updated_at = at.date();
        Ok(())
    }

    pub fn restore(&mut self, today: NaiveDate) -> Result<(), TaskError> {
        if self.status == TaskStatus::Pending {
            return Err(TaskError::NotCompleted(self.id.clone()));
        }
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        self.updated_at = today;
        Ok(())
    }

    /// Whether status and completion time agree
    pub fn is_consistent(&self) -> bool {
        (self.status == TaskStatus::Completed) == self.completed_at.is_some()
    }

    /// Reset an inconsistent task to pending; returns true if it was changed
    pub fn repair(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        self.status = TaskStatus::Pending;
        self.completed_at = None;
        true
    }
}

fn resolve_name(name: &str, file_path: Option<&str>) -> Result<String, TaskError> {
    let name = name.trim();
    if !name.is_empty() {
        return Ok(name.to_string());
    }
    file_path
        .and_then(|p| Path::new(p).file_stem())
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or(TaskError::EmptyName)
}
