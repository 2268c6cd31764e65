// --- File: crates/services/agenda_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the concrete collaborators from the loaded configuration: the
//! Supabase-backed store, storage and auth gateway when `use_supabase` is
//! on, and the Sheets notifier when `use_sheets` is on. Everything is
//! exposed through the `ServiceFactory` trait so the routers stay
//! decoupled from the integrations.

use agenda_common::services::{
    AppointmentStore, AuthGateway, BoxedError, DocumentStorage, ExportNotifier, ServiceFactory,
};
use agenda_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)]
use tracing::{error, info, warn};

#[cfg(feature = "supabase")]
use agenda_supabase::{
    auth::AuthClient, repository::AppointmentRepository, storage::DocumentBucket,
    SupabaseAppointmentStore, SupabaseAuthGateway, SupabaseClient, SupabaseDocumentStorage,
};

#[cfg(feature = "sheets")]
use agenda_sheets::SheetsNotifier;

pub struct AgendaServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "supabase")]
    appointment_store: Option<Arc<dyn AppointmentStore<Error = BoxedError>>>,
    #[cfg(feature = "supabase")]
    document_storage: Option<Arc<dyn DocumentStorage<Error = BoxedError>>>,
    #[cfg(feature = "supabase")]
    auth_gateway: Option<Arc<dyn AuthGateway<Error = BoxedError>>>,
    #[cfg(feature = "sheets")]
    export_notifier: Option<Arc<dyn ExportNotifier<Error = BoxedError>>>,
}

impl AgendaServiceFactory {
    /// Create a new service factory from the loaded configuration.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "supabase")]
            appointment_store: None,
            #[cfg(feature = "supabase")]
            document_storage: None,
            #[cfg(feature = "supabase")]
            auth_gateway: None,
            #[cfg(feature = "sheets")]
            export_notifier: None,
        };

        #[cfg(feature = "supabase")]
        {
            if config.use_supabase {
                match config.supabase.clone() {
                    Some(supabase_config) => match SupabaseClient::new(supabase_config) {
                        Ok(client) => {
                            info!("Initializing Supabase services...");
                            let client = Arc::new(client);
                            factory.appointment_store =
                                Some(Arc::new(SupabaseAppointmentStore::new(
                                    AppointmentRepository::new(client.clone()),
                                )));
                            factory.document_storage = Some(Arc::new(
                                SupabaseDocumentStorage::new(DocumentBucket::new(client.clone())),
                            ));
                            factory.auth_gateway = Some(Arc::new(SupabaseAuthGateway::new(
                                AuthClient::new(client),
                            )));
                        }
                        Err(err) => {
                            error!("Failed to create Supabase client: {}", err);
                        }
                    },
                    None => {
                        error!("use_supabase is set but the supabase config section is missing");
                    }
                }
            }
        }

        #[cfg(feature = "sheets")]
        {
            if config.use_sheets {
                match config.sheets.as_ref() {
                    Some(sheets_config) => match SheetsNotifier::from_config(sheets_config) {
                        Ok(notifier) => {
                            info!("Initializing Sheets export notifier...");
                            factory.export_notifier = Some(Arc::new(notifier));
                        }
                        Err(err) => {
                            // A broken export endpoint disables the export,
                            // it never blocks bookings.
                            warn!("Sheets export disabled: {}", err);
                        }
                    },
                    None => {
                        warn!("use_sheets is set but the sheets config section is missing");
                    }
                }
            }
        }

        factory
    }
}

impl ServiceFactory for AgendaServiceFactory {
    fn appointment_store(&self) -> Option<Arc<dyn AppointmentStore<Error = BoxedError>>> {
        #[cfg(feature = "supabase")]
        {
            self.appointment_store.clone()
        }
        #[cfg(not(feature = "supabase"))]
        {
            None
        }
    }

    fn document_storage(&self) -> Option<Arc<dyn DocumentStorage<Error = BoxedError>>> {
        #[cfg(feature = "supabase")]
        {
            self.document_storage.clone()
        }
        #[cfg(not(feature = "supabase"))]
        {
            None
        }
    }

    fn export_notifier(&self) -> Option<Arc<dyn ExportNotifier<Error = BoxedError>>> {
        #[cfg(feature = "sheets")]
        {
            self.export_notifier.clone()
        }
        #[cfg(not(feature = "sheets"))]
        {
            None
        }
    }

    fn auth_gateway(&self) -> Option<Arc<dyn AuthGateway<Error = BoxedError>>> {
        #[cfg(feature = "supabase")]
        {
            self.auth_gateway.clone()
        }
        #[cfg(not(feature = "supabase"))]
        {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockServiceFactory;
    use super::*;

    #[tokio::test]
    async fn mock_factory_provides_every_service() {
        let factory = MockServiceFactory::new();
        assert!(factory.appointment_store().is_some());
        assert!(factory.document_storage().is_some());
        assert!(factory.export_notifier().is_some());

        let auth = factory.auth_gateway().unwrap();
        let session = auth.login("admin@example.com", "hunter2").await.unwrap();
        assert_eq!(session.token_type, "bearer");
        assert!(auth.login("admin@example.com", "wrong").await.is_err());
    }

    #[test]
    fn factory_without_integrations_yields_no_services() {
        let config = Arc::new(AppConfig {
            server: agenda_config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            use_supabase: false,
            use_sheets: false,
            scheduling: Default::default(),
            supabase: None,
            sheets: None,
        });
        let factory = AgendaServiceFactory::new(config);
        assert!(factory.appointment_store().is_none());
        assert!(factory.export_notifier().is_none());
        assert!(factory.auth_gateway().is_none());
    }
}
