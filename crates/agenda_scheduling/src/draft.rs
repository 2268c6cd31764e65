// --- File: crates/agenda_scheduling/src/draft.rs ---
//! Booking draft state.
//!
//! Holds the in-progress selection: the displayed month, the selected
//! date and the selected time. The tentative slot is derived, never
//! stored, so the two halves of the selection cannot disagree. Any
//! month navigation clears the whole selection and any date change
//! clears the time, preventing a time from being carried across an
//! invalid date.

use crate::calendar::{first_of_month, month_grid, next_month, prev_month, MonthGrid};
use crate::error::SchedulingError;
use crate::policy::{is_day_selectable, is_slot_booked, BookedSlotSet, SlotTime};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone)]
pub struct BookingDraft {
    /// First day of the displayed month.
    month: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_time: Option<SlotTime>,
}

impl BookingDraft {
    /// A fresh draft displaying the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected_date: None,
            selected_time: None,
        }
    }

    /// First day of the displayed month.
    pub fn displayed_month(&self) -> NaiveDate {
        self.month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&SlotTime> {
        self.selected_time.as_ref()
    }

    /// The grid of the displayed month.
    pub fn grid(&self) -> MonthGrid {
        month_grid(self.month)
    }

    /// Display the following month; clears the selection.
    pub fn next_month(&mut self) {
        self.month = next_month(self.month);
        self.selected_date = None;
        self.selected_time = None;
    }

    /// Display the preceding month; clears the selection.
    pub fn prev_month(&mut self) {
        self.month = prev_month(self.month);
        self.selected_date = None;
        self.selected_time = None;
    }

    /// Select a day of the displayed month.
    ///
    /// Rejected days (past or weekend) leave the draft untouched.
    /// A successful selection always clears the selected time.
    pub fn select_day(&mut self, day: NaiveDate, today: NaiveDate) -> Result<(), SchedulingError> {
        if !is_day_selectable(day, today) {
            return Err(SchedulingError::DayNotSelectable);
        }
        self.selected_date = Some(day);
        self.selected_time = None;
        Ok(())
    }

    /// Select a time for the already-selected day.
    ///
    /// Requires a selected date; a slot already present in `booked` is
    /// rejected as taken.
    pub fn select_time(
        &mut self,
        slot: SlotTime,
        booked: &BookedSlotSet,
    ) -> Result<(), SchedulingError> {
        let date = self.selected_date.ok_or_else(|| {
            SchedulingError::Validation("select a date before choosing a time".to_string())
        })?;
        if is_slot_booked(date.and_time(slot.time), booked) {
            return Err(SchedulingError::SlotTaken);
        }
        self.selected_time = Some(slot);
        Ok(())
    }

    /// The candidate timestamp, present only when both halves are selected.
    pub fn tentative_slot(&self) -> Option<NaiveDateTime> {
        match (self.selected_date, &self.selected_time) {
            (Some(date), Some(slot)) => Some(date.and_time(slot.time)),
            _ => None,
        }
    }

    /// Drop the whole selection, keeping the displayed month.
    pub fn clear(&mut self) {
        self.selected_date = None;
        self.selected_time = None;
    }
}
