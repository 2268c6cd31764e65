// --- File: crates/services/agenda_backend/src/app_state.rs ---
use crate::service_factory::AgendaServiceFactory;
use agenda_common::services::ServiceFactory;
use agenda_config::AppConfig;
use std::sync::Arc;

/// Application state shared across the routers.
///
/// Holds the loaded configuration and the service factory so route
/// assembly has a single place to pull collaborators from. The factory is
/// kept behind the trait to allow tests to substitute mock services.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    #[allow(dead_code)]
    pub config: Arc<AppConfig>,

    /// Service factory for accessing the external collaborators.
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    /// Create a new AppState with the given configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let service_factory = Arc::new(AgendaServiceFactory::new(config.clone()));
        Self {
            config,
            service_factory,
        }
    }
}
