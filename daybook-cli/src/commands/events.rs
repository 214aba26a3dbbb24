use anyhow::Result;
use daybook_core::{CalendarDate, Event, EventStore};
use owo_colors::OwoColorize;

use crate::render::{Render, date_label};

pub fn run(
    store: &EventStore,
    from: Option<CalendarDate>,
    to: Option<CalendarDate>,
    json: bool,
) -> Result<()> {
    let mut events = store.events_between(
        from.unwrap_or(CalendarDate::MIN),
        to.unwrap_or(CalendarDate::MAX),
    );

    // Stable sort keeps insertion order within a day
    events.sort_by_key(Event::date);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let today = CalendarDate::today();
    let mut current_date: Option<CalendarDate> = None;

    for event in &events {
        if current_date != Some(event.date()) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(&event.date(), &today).bold());
            current_date = Some(event.date());
        }

        println!("{}", event.render());
    }

    Ok(())
}
