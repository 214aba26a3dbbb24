use anyhow::{Context, Result};
use daybook_core::{CalendarDate, EventStore};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &mut EventStore, date: CalendarDate, yes: bool) -> Result<()> {
    let events = store.events_for_date(date);

    if events.is_empty() {
        println!("{}", format!("No events on {}", date.render()).dimmed());
        return Ok(());
    }

    if events.len() > 1 && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {} events on {}?", events.len(), date.render()))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let removed = store
        .remove(date)
        .with_context(|| format!("Failed to save events to {}", store.path().display()))?;
    log::info!("Removed {} events on {}", removed, date);

    for event in &events {
        println!("{} {}", "-".red(), event.description().red());
    }

    Ok(())
}
