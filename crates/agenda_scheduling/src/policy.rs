// --- File: crates/agenda_scheduling/src/policy.rs ---
//! Slot validity policy.
//!
//! Day selectability and booked-slot membership. Booking granularity is
//! the fixed configured time-of-day list, so slot membership is an
//! exact-match test at minute resolution, not an interval overlap.

use crate::error::SchedulingError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::collections::BTreeSet;

/// Whether `day` may be selected on `day == today or later`, weekends
/// excluded. Strict date-only comparison; time of day never enters.
pub fn is_day_selectable(day: NaiveDate, today: NaiveDate) -> bool {
    if day < today {
        return false;
    }
    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One entry of the configured daily time list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTime {
    /// The label exactly as configured, e.g. "14:00".
    pub label: String,
    pub time: NaiveTime,
}

/// Parse the configured "HH:MM" labels into slot times.
///
/// An unparsable entry is a configuration error; the whole list is
/// rejected rather than silently skipping the bad slot.
pub fn parse_time_slots(labels: &[String]) -> Result<Vec<SlotTime>, SchedulingError> {
    labels
        .iter()
        .map(|label| {
            NaiveTime::parse_from_str(label, "%H:%M")
                .map(|time| SlotTime {
                    label: label.clone(),
                    time,
                })
                .map_err(|_| {
                    SchedulingError::Config(format!(
                        "invalid time slot '{}' (expected HH:MM)",
                        label
                    ))
                })
        })
        .collect()
}

/// Session-local set of already-committed slot timestamps.
///
/// Grows by exactly one element per successful booking and never shrinks
/// within a session. Timestamps are truncated to the minute on entry so
/// membership matches the booking granularity.
#[derive(Debug, Clone, Default)]
pub struct BookedSlotSet(BTreeSet<NaiveDateTime>);

impl BookedSlotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed slot. Returns false if it was already present.
    pub fn insert(&mut self, slot: NaiveDateTime) -> bool {
        self.0.insert(truncate_to_minute(slot))
    }

    pub fn contains(&self, slot: NaiveDateTime) -> bool {
        self.0.contains(&truncate_to_minute(slot))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.0.iter()
    }
}

/// Exact-match membership test for a candidate timestamp.
pub fn is_slot_booked(candidate: NaiveDateTime, booked: &BookedSlotSet) -> bool {
    booked.contains(candidate)
}

fn truncate_to_minute(slot: NaiveDateTime) -> NaiveDateTime {
    slot.with_second(0).unwrap().with_nanosecond(0).unwrap()
}
