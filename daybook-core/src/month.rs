//! Month reference table.
//!
//! Twelve fixed months with their Polish names and nominal (non-leap) day
//! counts. February's real length is derived from the year on every lookup.

use std::fmt;

use crate::error::{DaybookError, DaybookResult};

/// A month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Month {
    ordinal: u8,
    name: &'static str,
    days: u8,
}

pub const MONTHS: [Month; 12] = [
    Month { ordinal: 1, name: "Styczeń", days: 31 },
    Month { ordinal: 2, name: "Luty", days: 28 },
    Month { ordinal: 3, name: "Marzec", days: 31 },
    Month { ordinal: 4, name: "Kwiecień", days: 30 },
    Month { ordinal: 5, name: "Maj", days: 31 },
    Month { ordinal: 6, name: "Czerwiec", days: 30 },
    Month { ordinal: 7, name: "Lipiec", days: 31 },
    Month { ordinal: 8, name: "Sierpień", days: 31 },
    Month { ordinal: 9, name: "Wrzesień", days: 30 },
    Month { ordinal: 10, name: "Październik", days: 31 },
    Month { ordinal: 11, name: "Listopad", days: 30 },
    Month { ordinal: 12, name: "Grudzień", days: 31 },
];

const GENITIVE_NAMES: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

fn index_of(ordinal: u8) -> DaybookResult<usize> {
    if (1..=12).contains(&ordinal) {
        Ok(ordinal as usize - 1)
    } else {
        Err(DaybookError::OutOfRange(ordinal))
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Look up a month with its nominal day count (February is always 28).
pub fn month_by_ordinal(ordinal: u8) -> DaybookResult<Month> {
    Ok(MONTHS[index_of(ordinal)?])
}

/// Look up a month with the day count that applies in `year`.
pub fn month_for_year(year: i32, ordinal: u8) -> DaybookResult<Month> {
    let mut month = month_by_ordinal(ordinal)?;
    month.days = length_of(year, ordinal);
    Ok(month)
}

pub fn days_in_month(year: i32, ordinal: u8) -> DaybookResult<u8> {
    index_of(ordinal)?;
    Ok(length_of(year, ordinal))
}

/// Day count for an ordinal already known to be in 1..=12.
pub(crate) fn length_of(year: i32, ordinal: u8) -> u8 {
    if ordinal == 2 && is_leap_year(year) {
        29
    } else {
        MONTHS[ordinal as usize - 1].days
    }
}

/// Inflected month name for building phrases like "15 marca 2024".
pub fn genitive_name(ordinal: u8) -> DaybookResult<&'static str> {
    Ok(GENITIVE_NAMES[index_of(ordinal)?])
}

impl Month {
    /// 1 = January, 12 = December
    pub fn ordinal(&self) -> u8 {
        self.ordinal
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Day count. Nominal in [`MONTHS`], year-correct from [`month_for_year`].
    pub fn days(&self) -> u8 {
        self.days
    }

    pub fn genitive_name(&self) -> &'static str {
        GENITIVE_NAMES[self.ordinal as usize - 1]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
