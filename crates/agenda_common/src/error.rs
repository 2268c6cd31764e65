// --- File: crates/agenda_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all agenda errors.
///
/// The variants mirror how failures propagate through the booking flow:
/// validation never reaches the network, upload and persistence failures
/// abort a submission and return it to an idle, retryable state, and
/// notification failures are logged and swallowed. The remaining variants
/// cover the ambient concerns (config, auth, transport).
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Client-side, field-level validation failure; blocks submission entirely
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document upload failed; aborts the whole submission
    #[error("Upload error: {0}")]
    Upload(String),

    /// The appointment store rejected or failed the operation
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The export notifier failed; never fatal, logged only
    #[error("Notification error: {0}")]
    Notification(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication or authorization failure
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse data (dates, payloads, responses)
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g. slot already taken, submission in flight)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Anything that does not fit the taxonomy above
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AgendaError {
    fn status_code(&self) -> u16 {
        match self {
            AgendaError::Validation(_) => 400,
            AgendaError::Upload(_) => 502,
            AgendaError::Persistence(_) => 500,
            AgendaError::Notification(_) => 502,
            AgendaError::Config(_) => 500,
            AgendaError::Auth(_) => 401,
            AgendaError::Http(_) => 500,
            AgendaError::Parse(_) => 400,
            AgendaError::NotFound(_) => 404,
            AgendaError::Conflict(_) => 409,
            AgendaError::Internal(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| AgendaError::Internal(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, AgendaError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| AgendaError::Internal(format!("{}: {}", f(), error)))
    }
}

/// Shorthand constructors used across the crates.
pub fn validation_error(message: impl fmt::Display) -> AgendaError {
    AgendaError::Validation(message.to_string())
}

pub fn config_error(message: impl fmt::Display) -> AgendaError {
    AgendaError::Config(message.to_string())
}

pub fn conflict(message: impl fmt::Display) -> AgendaError {
    AgendaError::Conflict(message.to_string())
}

pub fn not_found(message: impl fmt::Display) -> AgendaError {
    AgendaError::NotFound(message.to_string())
}

pub fn internal_error(message: impl fmt::Display) -> AgendaError {
    AgendaError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(validation_error("cpf").status_code(), 400);
        assert_eq!(AgendaError::Upload("put failed".into()).status_code(), 502);
        assert_eq!(AgendaError::Persistence("insert".into()).status_code(), 500);
        assert_eq!(AgendaError::Auth("bad token".into()).status_code(), 401);
        assert_eq!(conflict("slot taken").status_code(), 409);
        assert_eq!(not_found("appointment 7").status_code(), 404);
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("loading key file").unwrap_err();
        assert!(err.to_string().contains("loading key file"));
        assert!(err.to_string().contains("boom"));
    }
}
