//! Calendar date with day/week/month navigation.
//!
//! A `CalendarDate` is a validated (day, month, year) triple. Navigation
//! methods mutate the date in place and always leave it valid. Moving past
//! [`CalendarDate::MIN`] or [`CalendarDate::MAX`] stops at that bound. The
//! type is `Copy`, so callers that need to keep the previous value copy it
//! first.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};

use crate::error::{DaybookError, DaybookResult};
use crate::month::{self, Month};
use crate::weekday::Weekday;

/// Reference point for [`CalendarDate::weekday_by_anchor`].
const ANCHOR: CalendarDate = CalendarDate {
    year: 2020,
    month: 11,
    day: 30,
};
const ANCHOR_WEEKDAY: Weekday = Weekday::Monday;

/// Zeller residues: 0 = Saturday, 1 = Sunday, ..., 6 = Friday.
const CONGRUENCE_DAYS: [Weekday; 7] = [
    Weekday::Saturday,
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// A date in the proleptic Gregorian calendar.
///
/// Field order matters: the derived `Ord` compares year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Earliest representable date, for open-ended range queries.
    pub const MIN: CalendarDate = CalendarDate {
        year: i32::MIN,
        month: 1,
        day: 1,
    };

    /// Latest representable date, for open-ended range queries.
    pub const MAX: CalendarDate = CalendarDate {
        year: i32::MAX,
        month: 12,
        day: 31,
    };

    /// Build a date, rejecting any day or month outside its valid range.
    pub fn new(day: u8, month: u8, year: i32) -> DaybookResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DaybookError::InvalidDate(format!(
                "month {month} must be in range 1-12"
            )));
        }

        let days = month::length_of(year, month);
        if day == 0 || day > days {
            return Err(DaybookError::InvalidDate(format!(
                "day {day} out of range 1-{days} for {month:02}-{year:04}"
            )));
        }

        Ok(CalendarDate { year, month, day })
    }

    /// The host's current local date.
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// The month, with February's length correct for this date's year.
    pub fn month(&self) -> Month {
        // The ordinal is validated on construction
        month::month_for_year(self.year, self.month).unwrap_or(month::MONTHS[0])
    }

    pub fn month_ordinal(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days_in_current_month(&self) -> u8 {
        month::length_of(self.year, self.month)
    }

    pub fn first_of_month(&self) -> Self {
        CalendarDate { day: 1, ..*self }
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }

    // NAVIGATION:

    pub fn plus_day(&mut self) {
        if self.day < self.days_in_current_month() {
            self.day += 1;
        } else if self.advance_month() {
            self.day = 1;
        } else {
            *self = Self::MAX;
        }
    }

    pub fn minus_day(&mut self) {
        if self.day > 1 {
            self.day -= 1;
        } else if self.retreat_month() {
            self.day = self.days_in_current_month();
        } else {
            *self = Self::MIN;
        }
    }

    /// Move forward seven days, rolling over as many month ends as needed.
    pub fn plus_week(&mut self) {
        let mut day = self.day + 7;

        while day > self.days_in_current_month() {
            day -= self.days_in_current_month();
            if !self.advance_month() {
                *self = Self::MAX;
                return;
            }
        }

        self.day = day;
    }

    /// Move back seven days, rolling back as many month starts as needed.
    pub fn minus_week(&mut self) {
        let mut day = self.day as i16 - 7;

        while day < 1 {
            if !self.retreat_month() {
                *self = Self::MIN;
                return;
            }
            day += self.days_in_current_month() as i16;
        }

        self.day = day as u8;
    }

    /// Shift by `delta` months in either direction. The day is clamped to the
    /// length of the destination month (31 March - 1 month = end of February).
    pub fn add_months(&mut self, delta: i32) {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) + delta as i64;

        let Ok(year) = i32::try_from(total.div_euclid(12)) else {
            *self = if delta > 0 { Self::MAX } else { Self::MIN };
            return;
        };

        self.year = year;
        self.month = (total.rem_euclid(12) + 1) as u8;
        self.day = self.day.min(self.days_in_current_month());
    }

    pub fn reset_to_today(&mut self) {
        *self = Self::today();
    }

    /// False if the year would leave the `i32` range; the date is unchanged.
    fn advance_month(&mut self) -> bool {
        if self.month < 12 {
            self.month += 1;
            return true;
        }

        match self.year.checked_add(1) {
            Some(year) => {
                self.year = year;
                self.month = 1;
                true
            }
            None => false,
        }
    }

    fn retreat_month(&mut self) -> bool {
        if self.month > 1 {
            self.month -= 1;
            return true;
        }

        match self.year.checked_sub(1) {
            Some(year) => {
                self.year = year;
                self.month = 12;
                true
            }
            None => false,
        }
    }

    // DAY OF WEEK:

    /// Weekday found by walking from a date whose weekday is known
    /// (30 November 2020, a Monday). Cost grows with the distance from the
    /// anchor, so this is a cross-check for [`Self::weekday_by_congruence`].
    pub fn weekday_by_anchor(&self) -> Weekday {
        let mut probe = ANCHOR;
        let mut index = ANCHOR_WEEKDAY.index();

        if probe < *self {
            while probe < *self {
                probe.plus_week();
            }
            while probe != *self {
                probe.minus_day();
                index = (index + 6) % 7;
            }
        } else {
            while probe > *self {
                probe.minus_week();
            }
            while probe != *self {
                probe.plus_day();
                index = (index + 1) % 7;
            }
        }

        Weekday::from_index(index)
    }

    /// Weekday from Zeller's congruence for the Gregorian calendar.
    pub fn weekday_by_congruence(&self) -> Weekday {
        let q = self.day as i64;
        let mut m = self.month as i64;
        let mut y = self.year as i64;

        // January and February count as months 13 and 14 of the previous year
        if m < 3 {
            m += 12;
            y -= 1;
        }

        let k = y.rem_euclid(100);
        let j = y.div_euclid(100);
        let h = (q + 13 * (m + 1) / 5 + k + k / 4 + j.div_euclid(4) - 2 * j).rem_euclid(7);

        CONGRUENCE_DAYS[h as usize]
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday_by_congruence()
    }

    pub fn day_of_week_name(&self) -> &'static str {
        self.weekday().name()
    }

    /// Human-readable form, e.g. "15 marca 2024".
    pub fn formatted_with_month_name(&self) -> String {
        format!(
            "{} {} {}",
            self.day,
            self.month().genitive_name(),
            self.year
        )
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::today()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// `dd-MM-yyyy`, the form used in the events file.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = DaybookError;

    fn from_str(s: &str) -> DaybookResult<Self> {
        let invalid =
            || DaybookError::InvalidDate(format!("'{s}' does not match DD-MM-YYYY"));

        let mut parts = s.trim().splitn(3, '-');
        let (Some(day), Some(month), Some(year)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(day) || !two_digits(month) {
            return Err(invalid());
        }

        let day: u8 = day.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        CalendarDate::new(day, month, year)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
