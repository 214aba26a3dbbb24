//! Day of the week.

use std::fmt;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 0 = Monday ... 6 = Sunday. Wraps modulo 7.
    pub fn from_index(index: usize) -> Weekday {
        Self::ALL[index % 7]
    }

    /// 0 = Monday ... 6 = Sunday.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Poniedziałek",
            Weekday::Tuesday => "Wtorek",
            Weekday::Wednesday => "Środa",
            Weekday::Thursday => "Czwartek",
            Weekday::Friday => "Piątek",
            Weekday::Saturday => "Sobota",
            Weekday::Sunday => "Niedziela",
        }
    }

    /// Two-letter abbreviation used in grid headers.
    pub fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Pn",
            Weekday::Tuesday => "Wt",
            Weekday::Wednesday => "Śr",
            Weekday::Thursday => "Cz",
            Weekday::Friday => "Pt",
            Weekday::Saturday => "So",
            Weekday::Sunday => "Nd",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Weekday::from_index(day.num_days_from_monday() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_and_wrap() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
        assert_eq!(Weekday::from_index(7), Weekday::Monday);
        assert_eq!(Weekday::from_index(13), Weekday::Sunday);
    }

    #[test]
    fn test_from_chrono() {
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
    }

    #[test]
    fn test_names() {
        assert_eq!(Weekday::Saturday.to_string(), "Sobota");
        assert!(Weekday::Sunday.is_weekend());
        assert!(!Weekday::Friday.is_weekend());
    }
}
