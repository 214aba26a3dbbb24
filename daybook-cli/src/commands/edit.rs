use anyhow::{Context, Result};
use daybook_core::{CalendarDate, EventStore};
use owo_colors::OwoColorize;

use super::require_description;
use crate::render::Render;

pub fn run(
    store: &mut EventStore,
    date: CalendarDate,
    new_date: Option<CalendarDate>,
    description: &str,
) -> Result<()> {
    let description = require_description(description)?;

    let old = store.events_for_date(date);
    if old.is_empty() {
        anyhow::bail!("No events on {}", date.render());
    }

    let event = store
        .replace(date, new_date.unwrap_or(date), description)
        .with_context(|| format!("Failed to save events to {}", store.path().display()))?;

    for previous in &old {
        println!("{} {}", "-".red(), previous.description().red());
    }
    println!(
        "{} {} {}",
        "+".green(),
        event.description().green(),
        event.date().render().dimmed()
    );

    Ok(())
}
