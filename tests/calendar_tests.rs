//! Holiday calendar tool tests
mod common;

use common::*;
use reminder_mcp::{CalendarOracle, Storage};

#[tokio::test]
async fn test_set_day_stores_and_clears_overrides() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler
        .handle_set_day("2024-10-01".to_string(), false, Some("National Day".to_string()))
        .await
        .unwrap();
    assert_eq!(response, "Override stored. 2024-10-01: holiday (National Day)");

    // Setting a weekday back to workday removes the row
    let response = handler
        .handle_set_day("2024-10-01".to_string(), true, None)
        .await
        .unwrap();
    assert_eq!(response, "Back to default. 2024-10-01: workday");
    assert!(handler.snapshot().holidays.is_empty());
}

#[tokio::test]
async fn test_set_day_compensatory_workday_label() {
    let (handler, _temp_file) = get_test_handler();

    // Sunday 2024-09-29 worked
    handler
        .handle_set_day("2024-09-29".to_string(), true, None)
        .await
        .unwrap();

    let data = handler.snapshot();
    let row = data.holidays.get(date(2024, 9, 29)).unwrap();
    assert!(row.is_workday);
    assert_eq!(row.label, "Compensatory");
    assert!(data.holidays.is_workday(date(2024, 9, 29)));
}

#[tokio::test]
async fn test_set_day_weekend_holiday_needs_no_row() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler
        .handle_set_day("2024-03-16".to_string(), false, Some("Saturday".to_string()))
        .await
        .unwrap();
    assert_eq!(response, "Back to default. 2024-03-16: holiday (weekend)");
    assert!(handler.snapshot().holidays.is_empty());
}

#[tokio::test]
async fn test_set_day_rejects_bad_date() {
    let (handler, _temp_file) = get_test_handler();
    assert!(
        handler
            .handle_set_day("2024-13-01".to_string(), false, None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_toggle_day_round_trip() {
    let (handler, _temp_file) = get_test_handler();

    let response = handler.handle_toggle_day("2024-03-14".to_string()).await.unwrap();
    assert_eq!(response, "2024-03-14: holiday (Holiday)");
    assert_eq!(handler.snapshot().holidays.len(), 1);

    let response = handler.handle_toggle_day("2024-03-14".to_string()).await.unwrap();
    assert_eq!(response, "2024-03-14: workday");
    assert!(handler.snapshot().holidays.is_empty());

    let response = handler.handle_toggle_day("2024-03-16".to_string()).await.unwrap();
    assert_eq!(response, "2024-03-16: workday (Compensatory)");
}

#[tokio::test]
async fn test_list_overrides_filters_by_year_and_month() {
    let (handler, _temp_file) = get_test_handler();
    handler
        .handle_set_day("2024-10-01".to_string(), false, Some("National Day".to_string()))
        .await
        .unwrap();
    handler
        .handle_set_day("2024-09-30".to_string(), false, None)
        .await
        .unwrap();
    handler
        .handle_set_day("2025-01-01".to_string(), false, Some("New Year's Day".to_string()))
        .await
        .unwrap();

    let all = handler.handle_list_overrides(None, None).await.unwrap();
    assert_eq!(
        all,
        "3 override(s):\n\
         2024-09-30: holiday (Holiday)\n\
         2024-10-01: holiday (National Day)\n\
         2025-01-01: holiday (New Year's Day)\n"
    );

    let october = handler
        .handle_list_overrides(Some(2024), Some(10))
        .await
        .unwrap();
    assert_eq!(october, "1 override(s):\n2024-10-01: holiday (National Day)\n");

    let none = handler
        .handle_list_overrides(Some(2023), None)
        .await
        .unwrap();
    assert_eq!(none, "No holiday overrides");

    assert!(handler.handle_list_overrides(None, Some(10)).await.is_err());
}

#[tokio::test]
async fn test_day_status_range() {
    let (handler, _temp_file) = get_test_handler();
    handler
        .handle_set_day("2024-10-01".to_string(), false, Some("National Day".to_string()))
        .await
        .unwrap();

    let status = handler
        .handle_day_status("2024-09-28".to_string(), Some("2024-10-01".to_string()))
        .await
        .unwrap();
    assert_eq!(
        status,
        "2024-09-28: holiday (weekend)\n\
         2024-09-29: holiday (weekend)\n\
         2024-09-30: workday\n\
         2024-10-01: holiday (National Day)"
    );

    let single = handler
        .handle_day_status("2024-03-14".to_string(), None)
        .await
        .unwrap();
    assert_eq!(single, "2024-03-14: workday");
}

#[tokio::test]
async fn test_day_status_rejects_bad_ranges() {
    let (handler, _temp_file) = get_test_handler();

    let reversed = handler
        .handle_day_status("2024-03-14".to_string(), Some("2024-03-01".to_string()))
        .await;
    assert!(reversed.is_err());

    let too_long = handler
        .handle_day_status("2024-01-01".to_string(), Some("2025-06-01".to_string()))
        .await;
    assert!(too_long.is_err());
}

#[tokio::test]
async fn test_seed_holidays_replaces_year() {
    let (handler, temp_file) = get_test_handler();

    // A stray override that the seed must clear
    handler
        .handle_set_day("2024-08-08".to_string(), false, None)
        .await
        .unwrap();
    // Another year stays untouched
    handler
        .handle_set_day("2023-08-08".to_string(), false, None)
        .await
        .unwrap();

    let response = handler.handle_seed_holidays(2024).await.unwrap();
    assert!(response.starts_with("Seeded "));

    let data = handler.snapshot();
    assert!(data.holidays.get(date(2024, 8, 8)).is_none());
    assert!(data.holidays.get(date(2023, 8, 8)).is_some());
    assert_eq!(data.holidays.get(date(2024, 10, 1)).unwrap().label, "National Day");
    assert!(data.holidays.is_holiday(date(2024, 9, 30)));
    // Sunday 2024-09-29 is a holiday by default and has no row
    assert!(data.holidays.get(date(2024, 9, 29)).is_none());

    let stored = Storage::new(temp_file.path(), false).load().unwrap();
    assert_eq!(stored.holidays, data.holidays);
}
