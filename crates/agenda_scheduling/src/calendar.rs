// --- File: crates/agenda_scheduling/src/calendar.rs ---
//! Month grid generation for the booking calendar.
//!
//! The grid is the ordered cell sequence the calendar UI renders seven
//! per row: first one blank cell per weekday preceding the first of the
//! month (so column N always lines up with weekday N, Sunday = 0), then
//! one cell per day in ascending order. The whole sequence is derived
//! from the reference date alone.

use chrono::{Datelike, Months, NaiveDate};

/// One cell of the month grid: leading padding or a concrete date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(NaiveDate),
}

impl CalendarCell {
    /// The date of a day cell, `None` for padding.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(date) => Some(*date),
        }
    }
}

/// Lazy, finite iterator over the cells of one month.
///
/// Cloning restarts the sequence; there is no state beyond the derived
/// month bounds and the cursor.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first_day: NaiveDate,
    days_in_month: u32,
    leading_blanks: u32,
    position: u32,
}

impl MonthGrid {
    /// Number of blank padding cells before day 1.
    pub fn leading_blanks(&self) -> u32 {
        self.leading_blanks
    }

    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }
}

/// Build the grid for the month containing `reference`.
pub fn month_grid(reference: NaiveDate) -> MonthGrid {
    let first_day = first_of_month(reference);
    MonthGrid {
        first_day,
        days_in_month: days_in_month(first_day),
        // Sunday is column 0, matching the rendered weekday header.
        leading_blanks: first_day.weekday().num_days_from_sunday(),
        position: 0,
    }
}

impl Iterator for MonthGrid {
    type Item = CalendarCell;

    fn next(&mut self) -> Option<CalendarCell> {
        if self.position >= self.leading_blanks + self.days_in_month {
            return None;
        }
        let cell = if self.position < self.leading_blanks {
            CalendarCell::Blank
        } else {
            let day = self.position - self.leading_blanks + 1;
            // day is within 1..=days_in_month by construction
            CalendarCell::Day(self.first_day.with_day(day).unwrap())
        };
        self.position += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.leading_blanks + self.days_in_month - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthGrid {}

/// First day of the month containing `reference`.
pub fn first_of_month(reference: NaiveDate) -> NaiveDate {
    reference.with_day(1).unwrap()
}

/// First day of the month after the one containing `reference`.
pub fn next_month(reference: NaiveDate) -> NaiveDate {
    first_of_month(reference) + Months::new(1)
}

/// First day of the month before the one containing `reference`.
pub fn prev_month(reference: NaiveDate) -> NaiveDate {
    first_of_month(reference) - Months::new(1)
}

/// Number of days in the month containing `reference`.
pub fn days_in_month(reference: NaiveDate) -> u32 {
    let first = first_of_month(reference);
    (next_month(first) - first).num_days() as u32
}
