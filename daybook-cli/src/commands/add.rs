use anyhow::{Context, Result};
use daybook_core::{CalendarDate, EventStore};
use owo_colors::OwoColorize;

use super::require_description;
use crate::render::Render;

pub fn run(store: &mut EventStore, date: CalendarDate, description: &str) -> Result<()> {
    let description = require_description(description)?;

    let event = store
        .add(date, description)
        .with_context(|| format!("Failed to save event to {}", store.path().display()))?;

    println!(
        "{} {} {}",
        "+".green(),
        event.description().green(),
        event.date().render().dimmed()
    );

    Ok(())
}
