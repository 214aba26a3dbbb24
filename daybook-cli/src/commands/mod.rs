pub mod add;
pub mod config;
pub mod edit;
pub mod events;
pub mod month;
pub mod remove;
pub mod show;

use anyhow::{Context, Result};
use daybook_core::CalendarDate;

/// Parse a date argument: DD-MM-YYYY, or "today", "tomorrow", "yesterday".
pub fn parse_date(input: &str) -> Result<CalendarDate> {
    let mut date = CalendarDate::today();

    match input.trim().to_lowercase().as_str() {
        "today" => {}
        "tomorrow" => date.plus_day(),
        "yesterday" => date.minus_day(),
        other => {
            return other.parse::<CalendarDate>().with_context(|| {
                format!(
                    "Invalid date '{}'. Expected DD-MM-YYYY, today, tomorrow or yesterday",
                    input
                )
            });
        }
    }

    Ok(date)
}

/// Like [`parse_date`], defaulting to today.
pub fn parse_optional_date(input: Option<&str>) -> Result<CalendarDate> {
    input.map_or_else(|| Ok(CalendarDate::today()), parse_date)
}

/// Apply month, then week, then day steps. Negative counts move backwards.
pub fn navigate(date: &mut CalendarDate, days: i32, weeks: i32, months: i32) {
    date.add_months(months);

    for _ in 0..weeks.unsigned_abs() {
        if weeks > 0 {
            date.plus_week();
        } else {
            date.minus_week();
        }
    }

    for _ in 0..days.unsigned_abs() {
        if days > 0 {
            date.plus_day();
        } else {
            date.minus_day();
        }
    }
}

/// Reject descriptions the events file cannot hold meaningfully.
pub fn require_description(description: &str) -> Result<&str> {
    let description = description.trim();
    if description.is_empty() {
        anyhow::bail!("Event description cannot be empty");
    }
    Ok(description)
}
