use std::str::FromStr;

use chrono::{NaiveTime, Timelike};

use crate::{HOURS_PER_DAY, MINUTES_PER_HOUR, ParseError, TIME_SEPARATOR, TimeStep, prelude::*};

/// A wall-clock time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Into)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// # Errors
    /// Returns `ParseError::InvalidTime` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ParseError> {
        if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
            return Err(ParseError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0)
            .map(Self)
            .ok_or_else(|| ParseError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    pub fn midnight() -> Self {
        Self::default()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn hour(self) -> u8 {
        self.0.hour() as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn minute(self) -> u8 {
        self.0.minute() as u8
    }

    pub const fn naive(self) -> NaiveTime {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn minutes_since_midnight(self) -> u16 {
        (self.0.num_seconds_from_midnight() / 60) as u16
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}{TIME_SEPARATOR}{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let invalid = || ParseError::InvalidTime(trimmed.to_owned());

        let (hour, minute) = trimmed.split_once(TIME_SEPARATOR).ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }

        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl serde::Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The selectable options of the time-of-day control, from `00:00` in `step` increments.
pub fn time_slots(step: TimeStep) -> Vec<TimeOfDay> {
    let step = u16::from(step.minutes());
    let minutes_per_day = u16::from(HOURS_PER_DAY) * u16::from(MINUTES_PER_HOUR);

    (0..minutes_per_day)
        .step_by(usize::from(step))
        .filter_map(|total| {
            let hour = u8::try_from(total / u16::from(MINUTES_PER_HOUR)).ok()?;
            let minute = u8::try_from(total % u16::from(MINUTES_PER_HOUR)).ok()?;
            TimeOfDay::new(hour, minute).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::time;

    #[test]
    fn test_parse_valid_times() {
        let t = time("10:00");
        assert_eq!((t.hour(), t.minute()), (10, 0));
        assert_eq!(time("23:59").minutes_since_midnight(), 23 * 60 + 59);
        assert_eq!(time(" 07:05 ").to_string(), "07:05");
    }

    #[test]
    fn test_parse_invalid_times() {
        for input in ["24:00", "12:60", "7:05", "07:5", "0700", "07:00:00", "ab:cd", "-1:00"] {
            assert!(
                matches!(input.parse::<TimeOfDay>(), Err(ParseError::InvalidTime(_))),
                "Expected InvalidTime for {input}"
            );
        }
        assert!(matches!("".parse::<TimeOfDay>(), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(TimeOfDay::new(23, 59).is_ok());
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
        assert_eq!(TimeOfDay::midnight().to_string(), "00:00");
    }

    #[test]
    fn test_serde_string_format() {
        let t = time("18:00");
        let json = serde_json::to_string(&t).expect("serialize time");
        assert_eq!(json, r#""18:00""#);
        let parsed: TimeOfDay = serde_json::from_str(&json).expect("deserialize time");
        assert_eq!(parsed, t);
    }

    #[test]
    fn test_time_slots_default_step() {
        let slots = time_slots(TimeStep::default());
        assert_eq!(slots.len(), 48);
        assert_eq!(slots.first(), Some(&time("00:00")));
        assert_eq!(slots.get(1), Some(&time("00:30")));
        assert_eq!(slots.last(), Some(&time("23:30")));
    }

    #[test]
    fn test_time_slots_hourly() {
        let step = TimeStep::new(60).expect("hourly step");
        let slots = time_slots(step);
        assert_eq!(slots.len(), 24);
        assert!(slots.iter().all(|slot| slot.minute() == 0));
    }
}
