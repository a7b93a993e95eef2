//! Holiday calendar handlers

use crate::ReminderServerHandler;
use crate::calendar::SetDayOutcome;
use crate::formatting;
use crate::validation;
use chrono::NaiveDate;
use mcp_attr::{Result as McpResult, bail_public};

/// Longest range `day_status` will print
const MAX_STATUS_DAYS: i64 = 366;

impl ReminderServerHandler {
    /// Force a date to be a workday or a holiday.
    ///
    /// Setting a date to its default state removes its override row.
    pub async fn handle_set_day(
        &self,
        date: String,
        workday: bool,
        label: Option<String>,
    ) -> McpResult<String> {
        let date = validation::parse_date_param(&date)?;

        let mut data = self.data.lock().unwrap();
        let outcome = data.holidays.set_day(date, workday, label.as_deref());
        let line = formatting::day_status_line(&data.holidays, date);
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Set {} as {}", date, day_kind(workday))) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(match outcome {
            SetDayOutcome::Stored => format!("Override stored. {}", line),
            SetDayOutcome::ClearedToDefault => format!("Back to default. {}", line),
        })
    }

    /// Flip a date between workday and holiday.
    pub async fn handle_toggle_day(&self, date: String) -> McpResult<String> {
        let date = validation::parse_date_param(&date)?;

        let mut data = self.data.lock().unwrap();
        let now_holiday = data.holidays.toggle_day(date);
        let line = formatting::day_status_line(&data.holidays, date);
        drop(data);

        if let Err(e) =
            self.save_data_with_message(&format!("Toggle {} to {}", date, day_kind(!now_holiday)))
        {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(line)
    }

    pub async fn handle_list_overrides(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> McpResult<String> {
        let (year, month) = validation::parse_year_month(year, month)?;

        let data = self.data.lock().unwrap();
        let text = formatting::format_overrides(&data.holidays.overrides(year, month));
        drop(data);
        Ok(text)
    }

    /// Status of every date from `start` to `end` inclusive; `end` defaults to `start`.
    pub async fn handle_day_status(&self, start: String, end: Option<String>) -> McpResult<String> {
        let start = validation::parse_date_param(&start)?;
        let end = validation::parse_optional_date(end)?.unwrap_or(start);

        if end < start {
            bail_public!(_, "End date {} is before start date {}", end, start);
        }
        if (end - start).num_days() >= MAX_STATUS_DAYS {
            bail_public!(
                _,
                "Date range too long: at most {} days can be shown at once",
                MAX_STATUS_DAYS
            );
        }

        let data = self.data.lock().unwrap();
        let lines: Vec<String> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| formatting::day_status_line(&data.holidays, d))
            .collect();
        drop(data);

        Ok(lines.join("\n"))
    }

    /// Replace a year's overrides with the preset holiday list.
    pub async fn handle_seed_holidays(&self, year: i32) -> McpResult<String> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            bail_public!(_, "Invalid year {}", year);
        }

        let mut data = self.data.lock().unwrap();
        let stored = data.holidays.seed_year(year);
        drop(data);

        if let Err(e) = self.save_data_with_message(&format!("Seed holidays for {}", year)) {
            bail_public!(_, "Failed to save: {}", e);
        }

        Ok(format!("Seeded {} holiday override(s) for {}", stored, year))
    }
}

fn day_kind(workday: bool) -> &'static str {
    if workday { "workday" } else { "holiday" }
}
