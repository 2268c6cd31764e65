// --- File: crates/agenda_supabase/src/routes.rs ---

use crate::auth::AuthClient;
use crate::client::SupabaseClient;
use crate::handlers::{
    create_appointment_handler, delete_appointment_handler, list_appointments_handler,
    login_handler, logout_handler, update_appointment_handler, SupabaseState,
};
use crate::repository::AppointmentRepository;
use agenda_config::AppConfig;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router with the auth endpoints and the admin CRUD surface.
/// Requires the Supabase section of the config to be present.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let supabase_config = config
        .supabase
        .clone()
        .expect("Supabase config missing");
    let client =
        Arc::new(SupabaseClient::new(supabase_config).expect("Failed to create Supabase client"));
    let state = Arc::new(SupabaseState {
        config,
        repository: AppointmentRepository::new(client.clone()),
        auth: AuthClient::new(client),
    });

    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route(
            "/admin/appointments",
            get(list_appointments_handler).post(create_appointment_handler),
        )
        .route(
            "/admin/appointments/{id}",
            axum::routing::patch(update_appointment_handler).delete(delete_appointment_handler),
        )
        .with_state(state)
}
