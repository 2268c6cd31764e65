// --- File: crates/agenda_scheduling/src/error.rs ---
use agenda_common::HttpStatusCode;
use thiserror::Error;

/// Errors raised by the scheduling core.
///
/// Every variant returns control to a retryable state: validation and
/// selection errors never leave the process, upload and persistence
/// failures revert the session to idle.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Selected day is not available for booking.")]
    DayNotSelectable,

    #[error("Requested time slot is already booked.")]
    SlotTaken,

    #[error("A submission is already in progress.")]
    SubmissionInProgress,

    #[error("Booking already confirmed; reset the session to book another slot.")]
    SessionComplete,

    #[error("Document upload failed: {0}")]
    Upload(String),

    #[error("Failed to save the appointment: {0}")]
    Persistence(String),

    #[error("Failed to parse time: {0}")]
    TimeParse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::Validation(_) => 400,
            SchedulingError::DayNotSelectable => 409,
            SchedulingError::SlotTaken => 409,
            SchedulingError::SubmissionInProgress => 409,
            SchedulingError::SessionComplete => 409,
            SchedulingError::Upload(_) => 502,
            SchedulingError::Persistence(_) => 500,
            SchedulingError::TimeParse(_) => 400,
            SchedulingError::Config(_) => 500,
        }
    }
}
