//! The date-range picker component.
//!
//! [`DateRangePicker`] is driven by [`PickerEvent`]s from the host UI and
//! renders to [`MonthView`]s. It never auto-commits on a plain click unless
//! the configuration asks for it, and it never emits anything on close.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::grid::month_grids;
use crate::selection::{Availability, SelectionState};
use crate::{
    CalendarDate, DAYS_PER_WEEK, DateRange, DisabledDateSet, PickerConfig, PickerProps, RangeError,
    TimeOfDay, YearMonth,
};

/// A chosen range as the consumer sees it: ISO dates and optional `HH:MM` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeValue {
    pub start_date: CalendarDate,
    pub end_date:   CalendarDate,
    pub start_time: Option<TimeOfDay>,
    pub end_time:   Option<TimeOfDay>,
}

impl RangeValue {
    /// # Errors
    /// Returns `RangeError::InvalidRange` when the end date precedes the start date.
    pub fn dates(&self) -> Result<DateRange, RangeError> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Start and end instants for a reservation payload; a missing time means midnight.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` when the end date precedes the start date.
    pub fn to_datetimes(&self) -> Result<(NaiveDateTime, NaiveDateTime), RangeError> {
        let range = self.dates()?;
        let start = range
            .start()
            .naive()
            .and_time(self.start_time.unwrap_or_default().naive());
        let end = range.end().naive().and_time(self.end_time.unwrap_or_default().naive());
        Ok((start, end))
    }
}

impl std::fmt::Display for RangeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start_date)?;
        if let Some(time) = self.start_time {
            write!(f, " {time}")?;
        }
        if self.start_date == self.end_date && self.end_time.is_none() {
            return Ok(());
        }
        write!(f, " to {}", self.end_date)?;
        if let Some(time) = self.end_time {
            write!(f, " {time}")?;
        }
        Ok(())
    }
}

/// Input from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    DayClicked(CalendarDate),
    DayHovered(CalendarDate),
    HoverCleared,
    StartTimeSelected(TimeOfDay),
    EndTimeSelected(TimeOfDay),
    NextPage,
    PreviousPage,
    Commit,
    /// Outside click, close button or Escape, delivered by the host overlay
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Committed(RangeValue),
    Cancelled,
}

/// Receives the picker's final outcome.
pub trait RangeConsumer {
    fn on_commit(&mut self, value: RangeValue);

    fn on_cancel(&mut self) {}
}

/// Adapts a pair of closures into a [`RangeConsumer`].
pub struct Callbacks<C, X> {
    on_commit: C,
    on_cancel: X,
}

impl<C, X> Callbacks<C, X>
where
    C: FnMut(RangeValue),
    X: FnMut(),
{
    pub const fn new(on_commit: C, on_cancel: X) -> Self {
        Self { on_commit, on_cancel }
    }
}

impl<C, X> RangeConsumer for Callbacks<C, X>
where
    C: FnMut(RangeValue),
    X: FnMut(),
{
    fn on_commit(&mut self, value: RangeValue) {
        (self.on_commit)(value);
    }

    fn on_cancel(&mut self) {
        (self.on_cancel)();
    }
}

/// One rendered day. Recomputed from scratch on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDay {
    pub date:               CalendarDate,
    pub is_today:           bool,
    pub in_displayed_month: bool,
    /// Booked or before the minimum date; styled as non-interactive
    pub is_disabled:        bool,
    pub in_selected_range:  bool,
    pub is_range_start:     bool,
    pub is_range_end:       bool,
    pub in_preview:         bool,
}

impl CalendarDay {
    pub const fn is_interactive(&self) -> bool {
        !self.is_disabled
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    pub title: String,
    /// `None` marks a blank slot past the edge of the supported calendar
    pub weeks: Vec<[Option<CalendarDay>; DAYS_PER_WEEK]>,
}

/// A calendar picker producing a validated date (and optionally time) range.
#[derive(Debug, Clone)]
pub struct DateRangePicker {
    config:      PickerConfig,
    disabled:    DisabledDateSet,
    min_date:    Option<CalendarDate>,
    today:       CalendarDate,
    initial:     Option<RangeValue>,
    selection:   SelectionState,
    placeholder: Option<RangeValue>,
    displayed:   YearMonth,
    hovered:     Option<CalendarDate>,
    open:        bool,
}

impl DateRangePicker {
    /// Opens a picker. A stale initial value (now overlapping disabled days)
    /// does not fail construction: it is kept only as [`Self::placeholder`].
    pub fn new(props: PickerProps) -> Self {
        let PickerProps {
            config,
            disabled_dates,
            initial_value,
            min_date,
            today,
        } = props;
        let today = today.unwrap_or_else(CalendarDate::today);

        let mut picker = Self {
            config,
            disabled: disabled_dates,
            min_date,
            today,
            initial: initial_value,
            selection: SelectionState::default(),
            placeholder: None,
            displayed: YearMonth::of(today),
            hovered: None,
            open: false,
        };
        picker.open();
        picker
    }

    /// (Re)opens the picker with a fresh selection seeded from the initial value.
    pub fn open(&mut self) {
        let single_day = self.config.is_single_date();
        self.selection = SelectionState::default();
        self.placeholder = None;
        self.hovered = None;

        if let Some(initial) = self.initial {
            let seeded = SelectionState::seeded(&initial, self.availability(), single_day);
            match seeded {
                Some(seeded) => self.selection = seeded,
                None => {
                    warn!(initial = %initial, "Initial value is no longer selectable; showing it as a placeholder");
                    self.placeholder = Some(initial);
                },
            }
        }

        let anchor = self
            .selection
            .range_start()
            .or_else(|| self.initial.map(|value| value.start_date))
            .unwrap_or_else(|| self.min_date.map_or(self.today, |min| min.max(self.today)));
        self.displayed = YearMonth::of(anchor);
        self.open = true;
        debug!(month = %self.displayed, phase = ?self.selection.phase(), "Picker opened");
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// A stale initial value, for faded display outside the grid
    pub const fn placeholder(&self) -> Option<&RangeValue> {
        self.placeholder.as_ref()
    }

    pub const fn displayed_month(&self) -> YearMonth {
        self.displayed
    }

    pub const fn disabled_dates(&self) -> &DisabledDateSet {
        &self.disabled
    }

    /// Options for the time-of-day control; empty for date-only variants
    pub fn time_options(&self) -> Vec<TimeOfDay> {
        self.config.time_options()
    }

    /// Whether the commit action is available
    pub fn can_commit(&self) -> bool {
        self.open && self.selection.is_complete(self.config.requires_time())
    }

    /// The hover preview range, already truncated at the first obstruction
    pub fn preview(&self) -> Option<DateRange> {
        let hovered = self.hovered?;
        self.selection.preview(hovered, self.availability())
    }

    /// Applies one event. Returns the outcome when the event finished the interaction.
    pub fn dispatch(&mut self, event: PickerEvent) -> Option<PickerOutcome> {
        if !self.open {
            trace!(?event, "Picker closed; ignoring event");
            return None;
        }

        match event {
            PickerEvent::DayClicked(day) => return self.click_day(day),
            PickerEvent::DayHovered(day) => self.hover(day),
            PickerEvent::HoverCleared => self.hovered = None,
            PickerEvent::StartTimeSelected(time) => self.select_start_time(time),
            PickerEvent::EndTimeSelected(time) => self.select_end_time(time),
            PickerEvent::NextPage => self.next_page(),
            PickerEvent::PreviousPage => self.previous_page(),
            PickerEvent::Commit => return self.commit().map(PickerOutcome::Committed),
            PickerEvent::Dismiss => {
                self.cancel();
                return Some(PickerOutcome::Cancelled);
            },
        }
        None
    }

    /// Applies one event and forwards any outcome to `consumer`.
    pub fn dispatch_to<R: RangeConsumer + ?Sized>(
        &mut self,
        event: PickerEvent,
        consumer: &mut R,
    ) -> Option<PickerOutcome> {
        let outcome = self.dispatch(event);
        match outcome {
            Some(PickerOutcome::Committed(value)) => consumer.on_commit(value),
            Some(PickerOutcome::Cancelled) => consumer.on_cancel(),
            None => {},
        }
        outcome
    }

    pub fn click_day(&mut self, day: CalendarDate) -> Option<PickerOutcome> {
        if !self.open {
            return None;
        }
        let availability = Availability {
            disabled: &self.disabled,
            min_date: self.min_date,
        };
        if !self.selection.click(day, availability, self.config.is_single_date()) {
            trace!(%day, "Ignoring click on a disabled day");
            return None;
        }
        debug!(
            %day,
            phase = ?self.selection.phase(),
            start = ?self.selection.range_start(),
            end = ?self.selection.range_end(),
            "Selection changed"
        );

        if self.config.commit_on_complete() && self.can_commit() {
            return self.commit().map(PickerOutcome::Committed);
        }
        None
    }

    pub fn hover(&mut self, day: CalendarDate) {
        self.hovered = Some(day);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn select_start_time(&mut self, time: TimeOfDay) {
        if self.config.requires_time() {
            self.selection.set_start_time(time);
        } else {
            trace!(%time, "Picker has no time control; ignoring start time");
        }
    }

    pub fn select_end_time(&mut self, time: TimeOfDay) {
        if self.config.requires_time() {
            self.selection.set_end_time(time);
        } else {
            trace!(%time, "Picker has no time control; ignoring end time");
        }
    }

    pub fn next_page(&mut self) {
        if let Some(next) = self.displayed.next() {
            self.displayed = next;
        }
    }

    pub fn previous_page(&mut self) {
        if let Some(prev) = self.displayed.prev() {
            self.displayed = prev;
        }
    }

    /// Emits the selection and closes. A no-op returning `None` while the
    /// commit action is unavailable.
    pub fn commit(&mut self) -> Option<RangeValue> {
        if !self.can_commit() {
            trace!(phase = ?self.selection.phase(), "Commit unavailable");
            return None;
        }
        let range = self.selection.range()?;
        let requires_time = self.config.requires_time();
        let value = RangeValue {
            start_date: range.start(),
            end_date:   range.end(),
            start_time: self.selection.start_time().filter(|_| requires_time),
            end_time:   self.selection.end_time().filter(|_| requires_time),
        };

        self.close();
        debug!(value = %value, "Picker committed");
        Some(value)
    }

    /// Aborts the interaction. Nothing of the in-progress selection is emitted.
    pub fn cancel(&mut self) {
        self.close();
        debug!("Picker cancelled");
    }

    /// Replaces the disabled set. An uncommitted selection that now collides
    /// is dropped, and an initial value that became stale turns into the placeholder.
    pub fn set_disabled_dates(&mut self, disabled: DisabledDateSet) {
        self.disabled = disabled;
        if self.selection.conflicts_with(self.availability()) {
            debug!(
                start = ?self.selection.range_start(),
                end = ?self.selection.range_end(),
                "Disabled dates changed under the selection; clearing it"
            );
            self.selection.clear_dates();
        }

        if self.placeholder.is_none() {
            let single_day = self.config.is_single_date();
            let stale = self
                .initial
                .filter(|initial| SelectionState::seeded(initial, self.availability(), single_day).is_none());
            if let Some(initial) = stale {
                warn!(initial = %initial, "Initial value is no longer selectable; showing it as a placeholder");
                self.placeholder = Some(initial);
            }
        }
    }

    /// The month grids with every display flag derived from the current state.
    pub fn render(&self) -> Vec<MonthView> {
        let availability = self.availability();
        let selected = self.selection.range();
        let preview = self.preview();
        let start = self.selection.range_start();
        let end = self.selection.range_end();

        month_grids(self.displayed, self.config.months_to_show())
            .into_iter()
            .map(|grid| {
                let title = grid.title();
                let weeks = grid
                    .weeks
                    .iter()
                    .map(|week| {
                        week.map(|slot| {
                            slot.map(|cell| CalendarDay {
                                date:               cell.date,
                                is_today:           cell.date == self.today,
                                in_displayed_month: cell.in_month,
                                is_disabled:        availability.is_blocked(cell.date),
                                in_selected_range:  selected.is_some_and(|range| range.contains(cell.date)),
                                is_range_start:     start == Some(cell.date),
                                is_range_end:       end == Some(cell.date),
                                in_preview:         preview.is_some_and(|range| range.contains(cell.date)),
                            })
                        })
                    })
                    .collect();
                MonthView {
                    month: grid.month,
                    title,
                    weeks,
                }
            })
            .collect()
    }

    fn close(&mut self) {
        self.open = false;
        self.hovered = None;
        self.selection = SelectionState::default();
    }

    const fn availability(&self) -> Availability<'_> {
        Availability {
            disabled: &self.disabled,
            min_date: self.min_date,
        }
    }
}
