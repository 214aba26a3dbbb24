//! Event record.

use std::fmt;

use serde::Serialize;

use crate::date::CalendarDate;

/// A dated note. Callers make sure the description is not empty; the event
/// itself does not validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    date: CalendarDate,
    description: String,
}

impl Event {
    pub fn new(date: CalendarDate, description: impl Into<String>) -> Self {
        Event {
            date,
            description: description.into(),
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.date, self.description)
    }
}
