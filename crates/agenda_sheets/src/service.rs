//! Sheets export notifier implementation.
//!
//! Implements the `ExportNotifier` trait over the Apps Script webhook.
//! The notifier is fire-and-forget from the flow's point of view: errors
//! are returned so the caller can log them, never acted upon.

use crate::logic::{script_url, send_row, SheetsError};
use agenda_common::services::{BoxFuture, BoxedError, ExportNotifier, ExportRow};
use agenda_config::SheetsConfig;

pub struct SheetsNotifier {
    url: String,
}

impl SheetsNotifier {
    /// Build the notifier, rejecting an unconfigured or non-https endpoint.
    pub fn from_config(config: &SheetsConfig) -> Result<Self, SheetsError> {
        Ok(Self {
            url: script_url(config)?,
        })
    }
}

impl ExportNotifier for SheetsNotifier {
    type Error = BoxedError;

    fn notify(&self, row: ExportRow) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            send_row(&self.url, &row)
                .await
                .map_err(|err| BoxedError(Box::new(err)))
        })
    }
}
