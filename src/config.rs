//! Picker configuration.
//!
//! A picker is configured once, at construction, by choosing one
//! [`PickerConfig`] variant. Props can be built in code or deserialized from
//! a JSON settings document:
//!
//! ```json
//! {
//!   "config": { "kind": "dateTimeRange", "monthsToShow": 2, "timeStep": 30 },
//!   "disabledDates": ["2025-06-10"],
//!   "minDate": "2025-06-01"
//! }
//! ```

use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DEFAULT_TIME_STEP_MINUTES, DisabledDateSet, MAX_MONTHS_TO_SHOW,
    MINUTES_PER_HOUR, RangeValue, TimeOfDay, time_slots,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid months to show: {0} (must be 1-{max})", max = MAX_MONTHS_TO_SHOW)]
    InvalidMonthsToShow(u8),

    #[error("Invalid time step: {0} minutes (must divide {hour} evenly)", hour = MINUTES_PER_HOUR)]
    InvalidTimeStep(u8),
}

/// How many month grids render side by side (1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthsToShow(NonZeroU8);

impl MonthsToShow {
    /// # Errors
    /// Returns `ConfigError::InvalidMonthsToShow` unless `1 <= value <= MAX_MONTHS_TO_SHOW`.
    pub fn new(value: u8) -> Result<Self, ConfigError> {
        let non_zero = NonZeroU8::new(value).ok_or(ConfigError::InvalidMonthsToShow(value))?;
        if value > MAX_MONTHS_TO_SHOW {
            return Err(ConfigError::InvalidMonthsToShow(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for MonthsToShow {
    fn default() -> Self {
        Self(NonZeroU8::MIN)
    }
}

impl TryFrom<u8> for MonthsToShow {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthsToShow> for u8 {
    fn from(value: MonthsToShow) -> Self {
        value.get()
    }
}

/// Minutes between the options of the time-of-day control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TimeStep(NonZeroU8);

impl TimeStep {
    /// # Errors
    /// Returns `ConfigError::InvalidTimeStep` unless the step divides an hour evenly.
    pub fn new(minutes: u8) -> Result<Self, ConfigError> {
        let non_zero = NonZeroU8::new(minutes).ok_or(ConfigError::InvalidTimeStep(minutes))?;
        if minutes > MINUTES_PER_HOUR || MINUTES_PER_HOUR % minutes != 0 {
            return Err(ConfigError::InvalidTimeStep(minutes));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn minutes(self) -> u8 {
        self.0.get()
    }
}

impl Default for TimeStep {
    fn default() -> Self {
        NonZeroU8::new(DEFAULT_TIME_STEP_MINUTES).map_or(Self(NonZeroU8::MIN), Self)
    }
}

impl TryFrom<u8> for TimeStep {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeStep> for u8 {
    fn from(value: TimeStep) -> Self {
        value.minutes()
    }
}

/// The picker variants. Each one fixes what a completed selection looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PickerConfig {
    /// One day; a single click completes the selection.
    SingleDate {
        #[serde(default)]
        commit_on_complete: bool,
    },
    /// A start and end day without times (search filter, report filter).
    DateRange {
        #[serde(default)]
        months_to_show:     MonthsToShow,
        #[serde(default)]
        commit_on_complete: bool,
    },
    /// A start and end day plus both times of day (booking, edit booking).
    /// Always committed explicitly.
    DateTimeRange {
        #[serde(default)]
        months_to_show: MonthsToShow,
        #[serde(default)]
        time_step:      TimeStep,
    },
}

impl PickerConfig {
    pub fn date_range(months_to_show: MonthsToShow) -> Self {
        Self::DateRange {
            months_to_show,
            commit_on_complete: false,
        }
    }

    pub fn date_time_range(months_to_show: MonthsToShow) -> Self {
        Self::DateTimeRange {
            months_to_show,
            time_step: TimeStep::default(),
        }
    }

    pub const fn single_date() -> Self {
        Self::SingleDate {
            commit_on_complete: false,
        }
    }

    pub fn months_to_show(&self) -> MonthsToShow {
        match *self {
            Self::SingleDate { .. } => MonthsToShow::default(),
            Self::DateRange { months_to_show, .. } | Self::DateTimeRange { months_to_show, .. } => {
                months_to_show
            },
        }
    }

    /// Whether both times of day are required before commit
    pub const fn requires_time(&self) -> bool {
        matches!(self, Self::DateTimeRange { .. })
    }

    pub const fn commit_on_complete(&self) -> bool {
        match *self {
            Self::SingleDate { commit_on_complete } | Self::DateRange { commit_on_complete, .. } => {
                commit_on_complete
            },
            Self::DateTimeRange { .. } => false,
        }
    }

    pub const fn is_single_date(&self) -> bool {
        matches!(self, Self::SingleDate { .. })
    }

    /// Options for the time-of-day control; empty when the variant has no times
    pub fn time_options(&self) -> Vec<TimeOfDay> {
        match *self {
            Self::DateTimeRange { time_step, .. } => time_slots(time_step),
            Self::SingleDate { .. } | Self::DateRange { .. } => Vec::new(),
        }
    }
}

/// Everything a consumer hands the picker when opening it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerProps {
    pub config:         PickerConfig,
    #[serde(default)]
    pub disabled_dates: DisabledDateSet,
    /// A previously chosen value, e.g. the booking being edited
    #[serde(default)]
    pub initial_value:  Option<RangeValue>,
    /// Days before this one behave like disabled days
    #[serde(default)]
    pub min_date:       Option<CalendarDate>,
    /// Defaults to the local clock's date
    #[serde(default)]
    pub today:          Option<CalendarDate>,
}

impl PickerProps {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            disabled_dates: DisabledDateSet::default(),
            initial_value: None,
            min_date: None,
            today: None,
        }
    }

    #[must_use]
    pub fn with_disabled_dates(mut self, disabled_dates: DisabledDateSet) -> Self {
        self.disabled_dates = disabled_dates;
        self
    }

    #[must_use]
    pub fn with_initial_value(mut self, initial_value: RangeValue) -> Self {
        self.initial_value = Some(initial_value);
        self
    }

    #[must_use]
    pub const fn with_min_date(mut self, min_date: CalendarDate) -> Self {
        self.min_date = Some(min_date);
        self
    }

    #[must_use]
    pub const fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_months_to_show_bounds() {
        assert!(MonthsToShow::new(1).is_ok());
        assert!(MonthsToShow::new(2).is_ok());
        assert_eq!(MonthsToShow::new(0), Err(ConfigError::InvalidMonthsToShow(0)));
        assert_eq!(MonthsToShow::new(3), Err(ConfigError::InvalidMonthsToShow(3)));
        assert_eq!(MonthsToShow::default().get(), 1);
    }

    #[test]
    fn test_time_step_bounds() {
        struct TestCase {
            minutes: u8,
            valid:   bool,
        }

        let cases = [
            TestCase { minutes: 1, valid: true },
            TestCase { minutes: 15, valid: true },
            TestCase { minutes: 30, valid: true },
            TestCase { minutes: 60, valid: true },
            TestCase { minutes: 0, valid: false },
            TestCase { minutes: 7, valid: false },
            TestCase { minutes: 45, valid: false },
            TestCase { minutes: 120, valid: false },
        ];

        for case in &cases {
            assert_eq!(
                TimeStep::new(case.minutes).is_ok(),
                case.valid,
                "time step {} minutes",
                case.minutes
            );
        }
        assert_eq!(TimeStep::default().minutes(), 30);
    }

    #[test]
    fn test_variant_properties() {
        let two = MonthsToShow::new(2).expect("two months");

        let single = PickerConfig::single_date();
        assert_eq!(single.months_to_show().get(), 1);
        assert!(!single.requires_time());
        assert!(single.is_single_date());
        assert!(single.time_options().is_empty());

        let range = PickerConfig::date_range(two);
        assert_eq!(range.months_to_show().get(), 2);
        assert!(!range.requires_time());
        assert!(!range.commit_on_complete());

        let timed = PickerConfig::date_time_range(two);
        assert!(timed.requires_time());
        assert!(!timed.commit_on_complete());
        assert_eq!(timed.time_options().len(), 48);
    }

    #[test]
    fn test_props_from_json() {
        let json = r#"{
            "config": { "kind": "dateTimeRange", "monthsToShow": 2, "timeStep": 15 },
            "disabledDates": ["2025-06-10", "2025-06-11"],
            "initialValue": {
                "startDate": "2025-06-01",
                "endDate": "2025-06-03",
                "startTime": "10:00",
                "endTime": null
            },
            "minDate": "2025-05-20"
        }"#;
        let props: PickerProps = serde_json::from_str(json).expect("deserialize props");

        assert_eq!(props.config.months_to_show().get(), 2);
        assert_eq!(props.config.time_options().len(), 96);
        assert_eq!(props.disabled_dates.len(), 2);
        assert_eq!(props.min_date, Some(date("2025-05-20")));
        assert_eq!(props.today, None);
        let initial = props.initial_value.expect("initial value present");
        assert_eq!(initial.start_date, date("2025-06-01"));
        assert_eq!(initial.end_time, None);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: PickerConfig =
            serde_json::from_str(r#"{ "kind": "dateRange", "commitOnComplete": true }"#).expect("deserialize config");
        assert_eq!(
            config,
            PickerConfig::DateRange {
                months_to_show:     MonthsToShow::default(),
                commit_on_complete: true,
            }
        );

        let single: PickerConfig = serde_json::from_str(r#"{ "kind": "singleDate" }"#).expect("deserialize single");
        assert_eq!(single, PickerConfig::single_date());
    }

    #[test]
    fn test_invalid_config_json_is_rejected() {
        let too_many: Result<PickerConfig, _> =
            serde_json::from_str(r#"{ "kind": "dateRange", "monthsToShow": 3 }"#);
        assert!(too_many.is_err());

        let bad_step: Result<PickerConfig, _> =
            serde_json::from_str(r#"{ "kind": "dateTimeRange", "timeStep": 7 }"#);
        assert!(bad_step.is_err());

        let bad_date: Result<PickerProps, _> =
            serde_json::from_str(r#"{ "config": { "kind": "singleDate" }, "disabledDates": ["2025-02-30"] }"#);
        assert!(bad_date.is_err());
    }
}
