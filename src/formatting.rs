//! Text rendering for MCP tool responses

use crate::calendar::{CalendarOracle, HolidayCalendar, HolidayOverride, is_weekend};
use crate::reminder::{AggregateReport, OverdueReport, SkippedTask, Verdict};
use crate::task::{Importance, Task, TaskStatus};
use chrono::NaiveDate;

/// Render the reminder panel
///
/// Buckets appear in panel order, each as a header followed by one line per
/// task. Tasks left out of the panel are listed in trailing notes.
pub fn format_panel(report: &AggregateReport) -> String {
    let mut result = String::new();

    if report.panel.is_empty() {
        result.push_str("No upcoming due tasks\n");
    } else {
        let sections: Vec<String> = report
            .panel
            .iter()
            .map(|(bucket, tasks)| {
                let mut section = format!("{}\n", bucket.title());
                for task in tasks {
                    section.push_str(&format!("{}\n", task));
                }
                section
            })
            .collect();
        result.push_str(&sections.join("\n"));
    }

    push_omissions(&mut result, &report.skipped, &report.faults);
    result
}

fn push_omissions(result: &mut String, skipped: &[SkippedTask], faults: &[SkippedTask]) {
    let notes = [
        (skipped, "their due date could not be read"),
        (faults, "the holiday calendar could not resolve their workdays"),
    ];
    for (tasks, reason) in notes {
        if tasks.is_empty() {
            continue;
        }
        result.push_str(&format!(
            "\nNote: {} task(s) skipped because {}:\n",
            tasks.len(),
            reason
        ));
        for task in tasks {
            result.push_str(&format!("- [{}] {}: {}\n", task.id, task.name, task.error));
        }
    }
}

/// Render a task listing
pub fn format_tasks(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&format!(
            "- [{}] {} {} (due: {})\n",
            task.id,
            task.importance.stars(),
            task.name,
            task.due_date
        ));
        if let Some(ref path) = task.file_path {
            result.push_str(&format!("  File: {}\n", path));
        }
        if task.status() == TaskStatus::Completed
            && let Some(at) = task.completed_at()
        {
            result.push_str(&format!("  Completed: {}\n", at.format("%Y-%m-%d %H:%M")));
        }
        result.push_str(&format!("  Created: {}\n", task.created_at));
    }
    result
}

/// Render the overdue listing with the number of days each task is late
pub fn format_overdue(report: &OverdueReport<'_>, today: NaiveDate) -> String {
    let mut result = if report.tasks.is_empty() {
        "No overdue tasks".to_string()
    } else {
        format!("{} overdue task(s):\n", report.tasks.len())
    };
    for task in &report.tasks {
        let late = task
            .due()
            .map(|due| format!(", {} day(s) late", (today - due).num_days()))
            .unwrap_or_default();
        result.push_str(&format!(
            "{} [{}] {} (due {}{})\n",
            task.importance.marker(),
            task.id,
            task.name,
            task.due_date,
            late
        ));
    }

    if report.tasks.is_empty() && (!report.skipped.is_empty() || !report.faults.is_empty()) {
        result.push('\n');
    }
    push_omissions(&mut result, &report.skipped, &report.faults);
    result
}

pub fn format_overrides(overrides: &[&HolidayOverride]) -> String {
    if overrides.is_empty() {
        return "No holiday overrides".to_string();
    }

    let mut result = format!("{} override(s):\n", overrides.len());
    for o in overrides {
        let kind = if o.is_workday { "workday" } else { "holiday" };
        result.push_str(&format!("{}: {} ({})\n", o.date, kind, o.label));
    }
    result
}

/// One status line for `date`, e.g. `2024-10-01: holiday (National Day)`
pub fn day_status_line(calendar: &HolidayCalendar, date: NaiveDate) -> String {
    let holiday = calendar.is_holiday(date);
    match (calendar.get(date), holiday) {
        (Some(o), true) => format!("{}: holiday ({})", date, o.label),
        (Some(o), false) => format!("{}: workday ({})", date, o.label),
        (None, true) if is_weekend(date) => format!("{}: holiday (weekend)", date),
        (None, true) => format!("{}: holiday", date),
        (None, false) => format!("{}: workday", date),
    }
}

pub fn format_verdict(due_date: NaiveDate, importance: Importance, verdict: Verdict) -> String {
    if verdict.needs_reminder {
        format!(
            "{} ({}): {} [{}]",
            due_date,
            importance,
            verdict.urgency.message(),
            verdict.urgency
        )
    } else {
        format!("{} ({}): no reminder needed", due_date, importance)
    }
}
