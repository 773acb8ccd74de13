//! The set of days a picker must never select.
//!
//! The set is owned by the consumer (usually filled from the booked-days
//! endpoint) and handed to the picker read-only.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::warn;

use crate::{CalendarDate, DateRange, ParseError};

/// Ordered set of disabled calendar days.
///
/// Deserializes from a JSON array of ISO date strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DisabledDateSet {
    dates: BTreeSet<CalendarDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisabledDatesError {
    #[error("Invalid disabled date at index {index}: {source}")]
    InvalidEntry {
        index:  usize,
        #[source]
        source: ParseError,
    },
}

/// Body of `GET /cars/{carId}/booked-days`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookedDaysResponse {
    #[serde(default)]
    pub content: Vec<String>,
}

impl DisabledDateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses ISO date strings, failing on the first malformed entry.
    ///
    /// # Errors
    /// Returns `DisabledDatesError::InvalidEntry` naming the offending index.
    pub fn parse<I, S>(dates: I) -> Result<Self, DisabledDatesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        dates
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                raw.as_ref()
                    .parse::<CalendarDate>()
                    .map_err(|source| DisabledDatesError::InvalidEntry { index, source })
            })
            .collect()
    }

    /// Parses ISO date strings, skipping (and logging) malformed entries.
    pub fn from_lossy<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        dates
            .into_iter()
            .filter_map(|raw| match raw.as_ref().parse::<CalendarDate>() {
                Ok(date) => Some(date),
                Err(error) => {
                    warn!(value = raw.as_ref(), %error, "Skipping malformed disabled date");
                    None
                },
            })
            .collect()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date)
    }

    /// The earliest disabled day within `start..=end`, if any
    pub fn first_between(&self, start: CalendarDate, end: CalendarDate) -> Option<CalendarDate> {
        if start > end {
            return None;
        }
        self.dates.range(start..=end).next().copied()
    }

    pub fn intersects(&self, range: &DateRange) -> bool {
        self.first_between(range.start(), range.end()).is_some()
    }

    /// A copy with every day of `range` re-enabled.
    ///
    /// Used when editing a booking: the booking's own days must stay selectable.
    pub fn without_range(&self, range: &DateRange) -> Self {
        let dates = self
            .dates
            .iter()
            .copied()
            .filter(|date| !range.contains(*date))
            .collect();
        Self { dates }
    }

    pub fn insert(&mut self, date: CalendarDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<CalendarDate> for DisabledDateSet {
    fn from_iter<T: IntoIterator<Item = CalendarDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<BookedDaysResponse> for DisabledDateSet {
    type Error = DisabledDatesError;

    fn try_from(response: BookedDaysResponse) -> Result<Self, Self::Error> {
        Self::parse(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, disabled, init_tracing};

    #[test]
    fn test_parse_reports_bad_index() {
        let result = DisabledDateSet::parse(["2025-06-10", "2025-06-31", "2025-06-12"]);
        assert!(matches!(
            result,
            Err(DisabledDatesError::InvalidEntry {
                index:  1,
                source: ParseError::InvalidDay { .. },
            })
        ));
    }

    #[test]
    fn test_from_lossy_skips_bad_entries() {
        init_tracing();
        let set = DisabledDateSet::from_lossy(["2025-06-10", "garbage", "2025-06-12", "2025-06-10"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(date("2025-06-10")));
        assert!(set.contains(date("2025-06-12")));
    }

    #[test]
    fn test_first_between() {
        let set = disabled(&["2025-06-10", "2025-06-14"]);
        assert_eq!(
            set.first_between(date("2025-06-08"), date("2025-06-20")),
            Some(date("2025-06-10"))
        );
        assert_eq!(
            set.first_between(date("2025-06-11"), date("2025-06-20")),
            Some(date("2025-06-14"))
        );
        assert_eq!(set.first_between(date("2025-06-11"), date("2025-06-13")), None);
        assert_eq!(set.first_between(date("2025-06-20"), date("2025-06-08")), None);
    }

    #[test]
    fn test_without_range_reenables_own_booking() {
        let set = disabled(&["2025-06-30", "2025-07-01", "2025-07-02", "2025-07-03", "2025-07-04"]);
        let own = DateRange::new(date("2025-07-01"), date("2025-07-03")).expect("own booking range");

        let allowed = set.without_range(&own);
        assert_eq!(
            allowed.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            ["2025-06-30", "2025-07-04"]
        );
        assert!(!allowed.contains(date("2025-07-02")));
        // the input set is untouched
        assert!(set.contains(date("2025-07-02")));
    }

    #[test]
    fn test_intersects() {
        let set = disabled(&["2025-06-10"]);
        let crossing = DateRange::new(date("2025-06-08"), date("2025-06-12")).expect("range");
        let before = DateRange::new(date("2025-06-01"), date("2025-06-09")).expect("range");
        assert!(set.intersects(&crossing));
        assert!(!set.intersects(&before));
    }

    #[test]
    fn test_booked_days_response() {
        let body = r#"{ "content": ["2025-06-10", "2025-06-11T00:00:00"] }"#;
        let response: BookedDaysResponse = serde_json::from_str(body).expect("deserialize body");
        let set = DisabledDateSet::try_from(response).expect("valid booked days");
        assert_eq!(set.len(), 2);
        assert!(set.contains(date("2025-06-11")));

        let empty: BookedDaysResponse = serde_json::from_str("{}").expect("deserialize empty body");
        assert!(DisabledDateSet::try_from(empty).expect("empty set").is_empty());
    }
}
