use anyhow::Result;
use daybook_core::{CalendarDate, EventStore, MonthGrid};
use owo_colors::OwoColorize;

use crate::render::GridRender;

pub fn run(store: &EventStore, mut date: CalendarDate, months: i32) -> Result<()> {
    date.add_months(months);

    let grid = MonthGrid::for_date(&date);
    let marked = store.event_dates();

    println!("{}", grid.render(&CalendarDate::today(), &marked));

    let first = date.first_of_month();
    let mut last = first;
    last.add_months(1);
    last.minus_day();

    let count = store.events_between(first, last).len();
    if count > 0 {
        let label = format!("{} {} this month", count, if count == 1 { "event" } else { "events" });
        println!("\n{}", label.dimmed());
    }

    Ok(())
}
