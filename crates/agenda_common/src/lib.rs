// --- File: crates/agenda_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, internal_error, not_found, validation_error, AgendaError, Context,
    HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, delete, get, patch, post, HTTP_CLIENT},
    map_error,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_result};
