//! Month grid generation.
//!
//! Produces the structure of a Sunday-first, 7-column calendar: complete
//! weeks, padded with muted days from the adjacent months. Padding that
//! would fall outside years `MIN_YEAR..=MAX_YEAR` is left as an empty slot.

use chrono::{Datelike, Days};

use crate::{CalendarDate, DAYS_PER_WEEK, MonthsToShow, WEEKDAY_LABELS, YearMonth};

/// One position in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub date:     CalendarDate,
    /// False for the leading/trailing padding days of adjacent months
    pub in_month: bool,
}

/// `None` marks a blank slot past the edge of the supported calendar
pub type Week = [Option<GridCell>; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn generate(month: YearMonth) -> Self {
        let first = month.first_day().naive();
        let leading = first.weekday().num_days_from_sunday() as usize;
        let used = leading + usize::from(month.days_in_month());
        let total = used.div_ceil(DAYS_PER_WEEK) * DAYS_PER_WEEK;

        let cells: Vec<Option<GridCell>> = (0..total)
            .map(|slot| {
                let offset = Days::new(slot.abs_diff(leading) as u64);
                let day = if slot < leading {
                    first.checked_sub_days(offset)
                } else {
                    first.checked_add_days(offset)
                };
                let date = CalendarDate::try_from(day?).ok()?;
                Some(GridCell {
                    date,
                    in_month: month.contains(date),
                })
            })
            .collect();

        let weeks = cells
            .chunks_exact(DAYS_PER_WEEK)
            .filter_map(|chunk| Week::try_from(chunk).ok())
            .collect();

        Self { month, weeks }
    }

    /// Header text, e.g. `June 2025`
    pub fn title(&self) -> String {
        format!("{} {}", self.month.month_typed().name(), self.month.year())
    }

    /// Every non-blank cell, in order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.weeks.iter().flatten().flatten()
    }
}

/// `months_to_show` consecutive grids starting at `first`.
///
/// Stops early rather than wrap past the last representable month.
pub fn month_grids(first: YearMonth, months_to_show: MonthsToShow) -> Vec<MonthGrid> {
    std::iter::successors(Some(first), |month| month.next())
        .take(usize::from(months_to_show.get()))
        .map(MonthGrid::generate)
        .collect()
}

pub const fn weekday_labels() -> [&'static str; DAYS_PER_WEEK] {
    WEEKDAY_LABELS
}
