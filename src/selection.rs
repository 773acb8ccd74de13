//! The range selection state machine.
//!
//! ```text
//! Empty --click--> StartPicked --click >= start--> RangeComplete
//!                   |    ^                               |
//!                   +----+ click < start (restart)       |
//!                   ^------------- click ----------------+
//! ```
//!
//! Blocked days (disabled, or before the minimum date) never enter the
//! selection: clicking one is a no-op, and an end click past a blocked day is
//! truncated to the last free day before it.

use crate::{CalendarDate, DateRange, DisabledDateSet, RangeValue, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Empty,
    StartPicked,
    RangeComplete,
}

/// Which days may be selected, derived from the latest props on every use.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Availability<'a> {
    pub disabled: &'a DisabledDateSet,
    pub min_date: Option<CalendarDate>,
}

impl Availability<'_> {
    pub fn is_blocked(&self, day: CalendarDate) -> bool {
        self.min_date.is_some_and(|min| day < min) || self.disabled.contains(day)
    }

    /// Whether every day of `start..=end` is selectable
    pub fn is_free(&self, start: CalendarDate, end: CalendarDate) -> bool {
        !self.is_blocked(start) && self.disabled.first_between(start, end).is_none()
    }

    /// The furthest day at or before `end` reachable from a free `start`
    /// without crossing a disabled day.
    pub fn reachable_end(&self, start: CalendarDate, end: CalendarDate) -> CalendarDate {
        match self.disabled.first_between(start, end) {
            Some(blocked) => blocked.pred().filter(|day| *day >= start).unwrap_or(start),
            None => end,
        }
    }
}

/// The picker's only mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    phase:       Phase,
    range_start: Option<CalendarDate>,
    range_end:   Option<CalendarDate>,
    start_time:  Option<TimeOfDay>,
    end_time:    Option<TimeOfDay>,
}

impl SelectionState {
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn range_start(&self) -> Option<CalendarDate> {
        self.range_start
    }

    pub const fn range_end(&self) -> Option<CalendarDate> {
        self.range_end
    }

    pub const fn start_time(&self) -> Option<TimeOfDay> {
        self.start_time
    }

    pub const fn end_time(&self) -> Option<TimeOfDay> {
        self.end_time
    }

    /// The completed date range, if any
    pub fn range(&self) -> Option<DateRange> {
        match (self.phase, self.range_start, self.range_end) {
            (Phase::RangeComplete, Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Whether the commit action is available.
    ///
    /// With times required, both must be set and a single-day range may not end
    /// before it starts.
    pub fn is_complete(&self, requires_time: bool) -> bool {
        if self.phase != Phase::RangeComplete {
            return false;
        }
        if !requires_time {
            return true;
        }
        match (self.start_time, self.end_time) {
            (Some(start_time), Some(end_time)) => self.range_start != self.range_end || start_time <= end_time,
            _ => false,
        }
    }

    /// Builds a state from a previously chosen value.
    ///
    /// Returns `None` when the value is no longer selectable (a stale value
    /// overlapped by newer bookings, or an inverted range).
    pub(crate) fn seeded(value: &RangeValue, availability: Availability<'_>, single_day: bool) -> Option<Self> {
        let start = value.start_date;
        let end = if single_day { start } else { value.end_date };
        if end < start || !availability.is_free(start, end) {
            return None;
        }
        Some(Self {
            phase:       Phase::RangeComplete,
            range_start: Some(start),
            range_end:   Some(end),
            start_time:  value.start_time,
            end_time:    value.end_time,
        })
    }

    /// Applies a day click. Returns whether the state changed.
    pub(crate) fn click(&mut self, day: CalendarDate, availability: Availability<'_>, single_day: bool) -> bool {
        if availability.is_blocked(day) {
            return false;
        }

        if single_day {
            self.phase = Phase::RangeComplete;
            self.range_start = Some(day);
            self.range_end = Some(day);
            return true;
        }

        match (self.phase, self.range_start) {
            (Phase::StartPicked, Some(start)) if day >= start => {
                self.range_end = Some(availability.reachable_end(start, day));
                self.phase = Phase::RangeComplete;
            },
            _ => {
                self.range_start = Some(day);
                self.range_end = None;
                self.phase = Phase::StartPicked;
            },
        }
        true
    }

    /// The range a click on `hovered` would complete, without applying it
    pub(crate) fn preview(&self, hovered: CalendarDate, availability: Availability<'_>) -> Option<DateRange> {
        let start = match (self.phase, self.range_start) {
            (Phase::StartPicked, Some(start)) if hovered >= start => start,
            _ => return None,
        };
        DateRange::new(start, availability.reachable_end(start, hovered)).ok()
    }

    pub(crate) fn set_start_time(&mut self, time: TimeOfDay) {
        self.start_time = Some(time);
    }

    pub(crate) fn set_end_time(&mut self, time: TimeOfDay) {
        self.end_time = Some(time);
    }

    /// Whether the current dates collide with `availability`
    pub(crate) fn conflicts_with(&self, availability: Availability<'_>) -> bool {
        match (self.range_start, self.range_end) {
            (Some(start), Some(end)) => !availability.is_free(start, end),
            (Some(start), None) => availability.is_blocked(start),
            _ => false,
        }
    }

    /// Drops the dates; the chosen times survive, they are independent of them
    pub(crate) fn clear_dates(&mut self) {
        self.phase = Phase::Empty;
        self.range_start = None;
        self.range_end = None;
    }
}
