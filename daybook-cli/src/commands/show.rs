use anyhow::Result;
use daybook_core::{CalendarDate, EventStore};
use owo_colors::OwoColorize;

use super::navigate;
use crate::render::{Render, date_label};

pub fn run(
    store: &EventStore,
    mut date: CalendarDate,
    days: i32,
    weeks: i32,
    months: i32,
) -> Result<()> {
    navigate(&mut date, days, weeks, months);

    println!("{}", date_label(&date, &CalendarDate::today()).bold());

    let events = store.events_for_date(date);
    if events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
