//! TUI rendering traits for daybook types.
//!
//! Extension traits that add colored terminal rendering to daybook-core types
//! using owo_colors.

use std::collections::BTreeSet;

use daybook_core::{CalendarDate, Event, MonthGrid, Weekday};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarDate {
    fn render(&self) -> String {
        format!("{}, {}", self.day_of_week_name(), self.formatted_with_month_name())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!("  {} {}", "•".cyan(), self.description())
    }
}

/// Label for a day heading: "Today", "Tomorrow", "Yesterday" or the full date.
pub fn date_label(date: &CalendarDate, today: &CalendarDate) -> String {
    let mut tomorrow = *today;
    tomorrow.plus_day();
    let mut yesterday = *today;
    yesterday.minus_day();

    if date == today {
        format!("Today ({})", date.render())
    } else if *date == tomorrow {
        format!("Tomorrow ({})", date.render())
    } else if *date == yesterday {
        format!("Yesterday ({})", date.render())
    } else {
        date.render()
    }
}

/// Month grid rendering, with today and days that carry events highlighted.
pub trait GridRender {
    fn render(&self, today: &CalendarDate, marked: &BTreeSet<CalendarDate>) -> String;
}

/// Width of one day cell, without the separating space
const CELL_WIDTH: usize = 2;

impl GridRender for MonthGrid {
    fn render(&self, today: &CalendarDate, marked: &BTreeSet<CalendarDate>) -> String {
        let mut lines = Vec::new();

        let title = format!("{} {}", self.month().name(), self.year());
        lines.push(title.bold().to_string());

        let header: Vec<String> = Weekday::ALL
            .iter()
            .map(|d| format!("{:>width$}", d.short_name(), width = CELL_WIDTH))
            .collect();
        lines.push(header.join(" ").dimmed().to_string());

        for week in self.weeks() {
            let cells: Vec<String> = week
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell {
                    Some(day) => render_day(self, *day, Weekday::from_index(column), today, marked),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect();
            lines.push(cells.join(" ").trim_end().to_string());
        }

        lines.join("\n")
    }
}

fn render_day(
    grid: &MonthGrid,
    day: u8,
    weekday: Weekday,
    today: &CalendarDate,
    marked: &BTreeSet<CalendarDate>,
) -> String {
    let text = format!("{:>width$}", day, width = CELL_WIDTH);
    let Some(date) = grid.date_of(day) else {
        return text;
    };

    if date == *today {
        text.reversed().bold().to_string()
    } else if marked.contains(&date) {
        text.yellow().underline().to_string()
    } else if weekday.is_weekend() {
        text.dimmed().to_string()
    } else {
        text
    }
}
