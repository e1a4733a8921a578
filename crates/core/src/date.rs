use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{AlmanacError, Result};

/// Leap year used to place month/day keys on a calendar, so `02-29` is valid.
const CALENDAR_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// A day of the year in the backend's `MM-DD` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    month: u32,
    day: u32,
}

impl DateKey {
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(CALENDAR_YEAR, month, day).map(|_| Self { month, day })
    }

    pub fn today() -> Self {
        let now = Local::now();
        Self {
            month: now.month(),
            day: now.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn succ(self) -> Self {
        self.shift(Direction::Next)
    }

    pub fn pred(self) -> Self {
        self.shift(Direction::Previous)
    }

    pub fn shift(self, direction: Direction) -> Self {
        let date = self.as_date();
        let shifted = match direction {
            Direction::Next => date.succ_opt(),
            Direction::Previous => date.pred_opt(),
        };

        match shifted.filter(|d| d.year() == CALENDAR_YEAR) {
            Some(d) => Self::from_date(d),
            None => match direction {
                Direction::Next => Self { month: 1, day: 1 },
                Direction::Previous => Self { month: 12, day: 31 },
            },
        }
    }

    fn as_date(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(CALENDAR_YEAR, self.month, self.day)
            .unwrap_or(NaiveDate::MIN)
    }

    fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl FromStr for DateKey {
    type Err = AlmanacError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = || AlmanacError::InvalidDate {
            input: input.to_string(),
        };

        let bytes = input.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b'-'
            && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit);
        if !well_formed {
            return Err(invalid());
        }

        let month = input[..2].parse().map_err(|_| invalid())?;
        let day = input[3..].parse().map_err(|_| invalid())?;
        Self::new(month, day).ok_or_else(invalid)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_mm_dd() {
        let date = key("07-26");
        assert_eq!((date.month(), date.day()), (7, 26));
        assert_eq!(date.to_string(), "07-26");
    }

    #[test]
    fn accepts_leap_day() {
        assert_eq!(key("02-29").to_string(), "02-29");
    }

    #[test]
    fn rejects_bad_shapes_and_impossible_days() {
        for input in ["7-26", "07/26", "0726", "07-266", "13-01", "04-31", "00-10", "ab-cd", ""] {
            assert!(
                matches!(input.parse::<DateKey>(), Err(AlmanacError::InvalidDate { .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn shifting_wraps_around_the_year() {
        assert_eq!(key("12-31").succ(), key("01-01"));
        assert_eq!(key("01-01").pred(), key("12-31"));
    }

    #[test]
    fn shifting_crosses_month_ends() {
        assert_eq!(key("02-28").succ(), key("02-29"));
        assert_eq!(key("02-29").succ(), key("03-01"));
        assert_eq!(key("03-01").pred(), key("02-29"));
        assert_eq!(key("04-30").succ(), key("05-01"));
    }

    #[test]
    fn today_is_a_valid_key() {
        let today = DateKey::today();
        assert_eq!(today.to_string().parse::<DateKey>().unwrap(), today);
    }
}
