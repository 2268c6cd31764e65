// --- File: crates/agenda_sheets/src/logic.rs ---

use agenda_common::services::ExportRow;
use agenda_common::HTTP_CLIENT;
use agenda_config::SheetsConfig;
use thiserror::Error;
use tracing::debug;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Export endpoint returned status {0}")]
    EndpointError(u16),
}

/// Validate the configured Apps Script endpoint.
///
/// The script URL must be an https endpoint; anything else means the
/// export was never wired up and the notifier should not be constructed.
pub fn script_url(config: &SheetsConfig) -> Result<String, SheetsError> {
    if !config.script_url.starts_with("https://") {
        return Err(SheetsError::ConfigError(
            "sheets.script_url is not an https URL; export disabled".to_string(),
        ));
    }
    Ok(config.script_url.clone())
}

/// Ship one flat row to the spreadsheet endpoint.
///
/// A single POST, no acknowledged response: the body is not read beyond
/// the status line, and nothing here retries. The caller decides whether
/// a failure matters (the booking flow logs and moves on).
pub async fn send_row(url: &str, row: &ExportRow) -> Result<(), SheetsError> {
    debug!("Exporting booking row to spreadsheet endpoint");
    let response = HTTP_CLIENT.post(url).json(row).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SheetsError::EndpointError(status.as_u16()));
    }
    Ok(())
}
