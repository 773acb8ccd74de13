use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_YEAR, MONTH_NAMES,
};
use crate::{CalendarDate, ParseError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;
use std::str::FromStr;

/// A displayable calendar year, `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// `ParseError::InvalidYear` outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month number, January = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// `ParseError::InvalidMonth` outside `1..=MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// English name of the month, for grid headers
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0.get() as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day-of-month value, validated against its year and month on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it exists in the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > days_in_month(year.get(), month.get()) {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A calendar month of a specific year: the unit the grid generator pages by.
///
/// Always anchored on the first day of the month, so conversion to a
/// [`CalendarDate`] never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth` for out-of-range parts.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        Ok(Self::from_parts(year, month))
    }

    /// Builds a month from already validated parts
    pub fn from_parts(year: Year, month: Month) -> Self {
        // Validated parts always land inside chrono's supported range.
        NaiveDate::from_ymd_opt(i32::from(year.get()), u32::from(month.get()), 1)
            .map_or(Self(NaiveDate::MIN), Self)
    }

    /// The month containing `date`
    pub fn of(date: CalendarDate) -> Self {
        Self(date.naive().with_day(1).unwrap_or_else(|| date.naive()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn year(self) -> u16 {
        // Construction keeps the year within 1..=MAX_YEAR.
        self.0.year() as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    pub fn month_typed(self) -> Month {
        Month::new(self.month()).unwrap_or(Month(NonZeroU8::MIN))
    }

    pub const fn first_day(self) -> CalendarDate {
        CalendarDate::from_naive(self.0)
    }

    pub fn last_day(self) -> CalendarDate {
        let last = self
            .0
            .with_day(u32::from(self.days_in_month()))
            .unwrap_or(self.0);
        CalendarDate::from_naive(last)
    }

    pub fn days_in_month(self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        Self::of(date) == self
    }

    /// The following month, or `None` past December of `MAX_YEAR`
    pub fn next(self) -> Option<Self> {
        let (year, month) = next_month(self.year(), self.month())?;
        Self::new(year, month).ok()
    }

    /// The preceding month, or `None` before January of `MIN_YEAR`
    pub fn prev(self) -> Option<Self> {
        let (year, month) = prev_month(self.year(), self.month())?;
        Self::new(year, month).ok()
    }

    /// Steps `count` months forward, stopping at the last representable month
    pub fn advance(self, count: u8) -> Self {
        (0..count).fold(self, |month, _| month.next().unwrap_or(month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (year, month) = trimmed
            .split_once(crate::consts::DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let year = CalendarDate::parse_component::<u16>(year, 4, trimmed)?;
        let month = CalendarDate::parse_component::<u8>(month, 2, trimmed)?;
        Self::new(year, month)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

const fn next_month(year: u16, month: u8) -> Option<(u16, u8)> {
    if month == DECEMBER {
        if year >= MAX_YEAR {
            None
        } else {
            Some((year + 1, JANUARY))
        }
    } else {
        Some((year, month + 1))
    }
}

const fn prev_month(year: u16, month: u8) -> Option<(u16, u8)> {
    if month == JANUARY {
        if year <= MIN_YEAR {
            None
        } else {
            Some((year - 1, DECEMBER))
        }
    } else {
        Some((year, month - 1))
    }
}
