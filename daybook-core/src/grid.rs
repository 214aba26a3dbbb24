//! Weekday-aligned day grid for one month.

use crate::date::CalendarDate;
use crate::month::Month;

/// One row of the grid, Monday first. `None` marks padding outside the month.
pub type Week = [Option<u8>; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: Month,
    weeks: Vec<Week>,
}

impl MonthGrid {
    /// Grid of the month containing `date`.
    pub fn for_date(date: &CalendarDate) -> Self {
        let first = date.first_of_month();
        let mut column = first.weekday().index();

        let mut weeks = Vec::new();
        let mut week: Week = [None; 7];

        for day in 1..=first.days_in_current_month() {
            week[column] = Some(day);
            column += 1;

            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }

        if column > 0 {
            weeks.push(week);
        }

        MonthGrid {
            year: first.year(),
            month: first.month(),
            weeks,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Day numbers in order, skipping padding.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.weeks.iter().flatten().flatten().copied()
    }

    /// The full date for a day number shown in this grid.
    pub fn date_of(&self, day: u8) -> Option<CalendarDate> {
        CalendarDate::new(day, self.month.ordinal(), self.year).ok()
    }
}
