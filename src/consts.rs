// Calendar bounds

/// Earliest year a picker can display or parse
pub const MIN_YEAR: u16 = 1;
/// Latest year a picker can display or parse
pub const MAX_YEAR: u16 = 9999;
pub const MAX_MONTH: u8 = 12;

pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
pub const DECEMBER: u8 = 12;

pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Month lengths in a common year, indexed by month number
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Grid header titles, indexed by month number
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Column headers; weeks start on Sunday
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
pub const DAYS_PER_WEEK: usize = 7;

// Gregorian leap rule: every 4th year, except centuries not divisible by 400
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

// Picker layout

pub const MAX_MONTHS_TO_SHOW: u8 = 2;
pub const DEFAULT_TIME_STEP_MINUTES: u8 = 30;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const HOURS_PER_DAY: u8 = 24;

// Text formats

/// `YYYY-MM-DD`
pub const DATE_SEPARATOR: char = '-';
/// Trailing time part of a datetime string, ignored when parsing a date
pub const DATETIME_SEPARATOR: char = 'T';
/// `HH:MM`
pub const TIME_SEPARATOR: char = ':';
/// `start/end`
pub const RANGE_SEPARATOR: char = '/';
