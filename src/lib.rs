//! A headless calendar date-range picker.
//!
//! The picker owns a small selection state machine, generates Sunday-first
//! month grids and keeps every selection clear of an externally supplied set
//! of disabled (already booked) dates. It renders to plain data: drawing the
//! grid is left to the host UI.

mod config;
mod consts;
mod disabled;
mod grid;
mod picker;
mod prelude;
mod range;
mod selection;
mod time;
mod types;

pub use config::{ConfigError, MonthsToShow, PickerConfig, PickerProps, TimeStep};
pub use consts::*;
pub use disabled::{BookedDaysResponse, DisabledDateSet, DisabledDatesError};
pub use grid::{GridCell, MonthGrid, month_grids, weekday_labels};
pub use picker::{
    CalendarDay, Callbacks, DateRangePicker, MonthView, PickerEvent, PickerOutcome, RangeConsumer,
    RangeValue,
};
pub use range::{DateRange, RangeError};
pub use selection::{Phase, SelectionState};
pub use time::{TimeOfDay, time_slots};
pub use types::{Day, Month, Year, YearMonth, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, Local, NaiveDate, Weekday};
use std::str::FromStr;

/// A timezone-naive calendar day.
///
/// Dates are compared purely by their calendar position; no timezone or DST
/// conversion ever happens, so a `YYYY-MM-DD` string always names the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Invalid time of day: {_0} (expected HH:MM)")]
    InvalidTime(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date from numeric parts, validating each one.
    ///
    /// # Errors
    /// Returns the `ParseError` variant for the first invalid component.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        NaiveDate::from_ymd_opt(
            i32::from(year.get()),
            u32::from(month.get()),
            u32::from(day.get()),
        )
        .map(Self)
        .ok_or(ParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: day.get(),
        })
    }

    /// Wraps a chrono date whose year is already known to be in range.
    pub(crate) const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The current date on the local clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(self) -> u16 {
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn day(self) -> u8 {
        self.0.day() as u8
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth::of(self)
    }

    /// The next day, or `None` past the last day of `MAX_YEAR`
    pub fn succ(self) -> Option<Self> {
        self.0
            .succ_opt()
            .filter(|next| next.year() <= i32::from(MAX_YEAR))
            .map(Self)
    }

    /// The previous day, or `None` before the first day of `MIN_YEAR`
    pub fn pred(self) -> Option<Self> {
        self.0
            .pred_opt()
            .filter(|prev| prev.year() >= i32::from(MIN_YEAR))
            .map(Self)
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Parses a fixed-width run of ASCII digits.
    pub(crate) fn parse_component<T: FromStr>(part: &str, width: usize, input: &str) -> Result<T, ParseError> {
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(input.to_owned()));
        }
        part.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(input.to_owned()))
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| ParseError::InvalidFormat(value.to_string()))?;
        Year::new(year)?;
        Ok(Self(value))
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Server datetimes carry a time part; only the calendar day matters here.
        let date_part = trimmed
            .split_once(DATETIME_SEPARATOR)
            .map_or(trimmed, |(date, _)| date);

        let parts: Vec<&str> = date_part.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        };

        let year = Self::parse_component::<u16>(year, 4, trimmed)?;
        let month = Self::parse_component::<u8>(month, 2, trimmed)?;
        let day = Self::parse_component::<u8>(day, 2, trimmed)?;
        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_iso_date() {
        let d = "2025-06-10".parse::<CalendarDate>().expect("parse iso date");
        assert_eq!((d.year(), d.month(), d.day()), (2025, 6, 10));
        assert_eq!(d.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_parse_ignores_time_part() {
        let d = "2025-06-10T14:30:00Z".parse::<CalendarDate>().expect("parse datetime");
        assert_eq!(d, date("2025-06-10"));
    }

    #[test]
    fn test_parse_errors() {
        struct TestCase {
            input:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                input:       "06/10/2025",
                description: "month-first slashes",
            },
            TestCase {
                input:       "2025-06",
                description: "missing day",
            },
            TestCase {
                input:       "2025-06-10-01",
                description: "too many separators",
            },
            TestCase {
                input:       "2025-XX-10",
                description: "non-numeric month",
            },
            TestCase {
                input:       "2025-02-30",
                description: "day past end of month",
            },
            TestCase {
                input:       "0000-01-01",
                description: "year zero",
            },
            TestCase {
                input:       "2025-6-1",
                description: "single-digit month and day",
            },
            TestCase {
                input:       "+2025-06-10",
                description: "signed year",
            },
            TestCase {
                input:       "25-06-10",
                description: "two-digit year",
            },
            TestCase {
                input:       "2025 - 06 - 10",
                description: "whitespace around separators",
            },
            TestCase {
                input:       "12025-06-10",
                description: "five-digit year",
            },
        ];

        for case in &cases {
            assert!(
                case.input.parse::<CalendarDate>().is_err(),
                "Expected failure for {} ({})",
                case.input,
                case.description
            );
        }

        assert!(matches!("   ".parse::<CalendarDate>(), Err(ParseError::EmptyInput)));
        assert!(matches!(
            "2023-02-29".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
    }

    #[test]
    fn test_display_pads_components() {
        let d = CalendarDate::new(987, 3, 4).expect("valid early date");
        assert_eq!(d.to_string(), "0987-03-04");
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date("2024-12-31") < date("2025-01-01"));
        assert!(date("2025-06-09") < date("2025-06-10"));
        assert_eq!(date("2025-06-09").days_until(date("2025-06-12")), 3);
        assert_eq!(date("2025-06-12").days_until(date("2025-06-09")), -3);
    }

    #[test]
    fn test_succ_pred_across_boundaries() {
        assert_eq!(date("2024-02-28").succ(), Some(date("2024-02-29")));
        assert_eq!(date("2023-02-28").succ(), Some(date("2023-03-01")));
        assert_eq!(date("2025-12-31").succ(), Some(date("2026-01-01")));
        assert_eq!(date("2026-01-01").pred(), Some(date("2025-12-31")));
        assert_eq!(date("9999-12-31").succ(), None);
        assert_eq!(date("0001-01-01").pred(), None);
    }

    #[test]
    fn test_serde_string_format() {
        let d = date("2025-08-01");
        let json = serde_json::to_string(&d).expect("serialize date");
        assert_eq!(json, r#""2025-08-01""#);

        let parsed: CalendarDate = serde_json::from_str(&json).expect("deserialize date");
        assert_eq!(parsed, d);

        let invalid: Result<CalendarDate, _> = serde_json::from_str(r#""2025-13-01""#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_try_from_naive_checks_year_range() {
        let ok = NaiveDate::from_ymd_opt(2025, 6, 10).expect("naive date");
        assert_eq!(CalendarDate::try_from(ok).expect("in range"), date("2025-06-10"));

        let too_late = NaiveDate::from_ymd_opt(10_000, 1, 1).expect("naive date");
        assert_eq!(CalendarDate::try_from(too_late), Err(ParseError::InvalidYear(10_000)));

        let year_zero = NaiveDate::from_ymd_opt(0, 12, 31).expect("naive date");
        assert_eq!(CalendarDate::try_from(year_zero), Err(ParseError::InvalidYear(0)));

        let negative = NaiveDate::from_ymd_opt(-5, 1, 1).expect("naive date");
        assert!(matches!(
            CalendarDate::try_from(negative),
            Err(ParseError::InvalidFormat(text)) if text.contains("-0005")
        ));
    }
}
