// --- File: crates/agenda_common/src/http/mod.rs ---
//! HTTP utilities shared by the handler crates.

pub mod client;

use crate::error::HttpStatusCode;
use axum::http::StatusCode;
use std::fmt;

/// Convert any taxonomy error into the `(StatusCode, String)` pair the
/// axum handlers return on failure.
pub fn map_error<E: HttpStatusCode + fmt::Display>(err: E) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;

    #[test]
    fn map_error_uses_taxonomy_status() {
        let (status, body) = map_error(AgendaError::Conflict("slot taken".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("slot taken"));
    }
}
