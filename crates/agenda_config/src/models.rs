// --- File: crates/agenda_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Scheduling Config ---
// Office calendar rules: timezone and the fixed daily slot list.
// Everything has a sensible default so the section can be omitted from
// the config files entirely. Weekends are never bookable.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchedulingConfig {
    /// IANA timezone the office operates in (e.g. "America/Sao_Paulo").
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Bookable times of day, "HH:MM", ascending.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
}

fn default_time_zone() -> String {
    "America/Sao_Paulo".to_string()
}

fn default_time_slots() -> Vec<String> {
    // Hourly office slots, lunch hour excluded.
    ["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        SchedulingConfig {
            time_zone: default_time_zone(),
            time_slots: default_time_slots(),
        }
    }
}

// --- Supabase Config ---
// Holds non-secret Supabase config. The anon key may use the
// "secret_from_env" marker and is then resolved from SUPABASE_ANON_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. "https://xyzcompany.supabase.co".
    pub project_url: String,
    pub anon_key: Option<String>,
    #[serde(default = "default_appointments_table")]
    pub appointments_table: String,
    #[serde(default = "default_documents_bucket")]
    pub documents_bucket: String,
}

fn default_appointments_table() -> String {
    "appointments".to_string()
}

fn default_documents_bucket() -> String {
    "documents".to_string()
}

// --- Google Sheets Export Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    /// Apps Script web-app endpoint receiving one flat row per booking.
    pub script_url: String,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_supabase: bool,
    #[serde(default)]
    pub use_sheets: bool,

    // Scheduling rules always exist; defaults apply when the section is absent.
    #[serde(default)]
    pub scheduling: SchedulingConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
    #[serde(default)]
    pub sheets: Option<SheetsConfig>,
}
