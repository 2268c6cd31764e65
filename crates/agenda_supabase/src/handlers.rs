// File: crates/agenda_supabase/src/handlers.rs
use crate::auth::AuthClient;
use crate::repository::AppointmentRepository;
use agenda_common::map_error;
use agenda_common::services::{AppointmentChanges, AppointmentRecord, AuthSession, NewAppointment};
use agenda_config::AppConfig;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// Shared state for the auth and admin routes.
#[derive(Clone)]
pub struct SupabaseState {
    pub config: Arc<AppConfig>,
    pub repository: AppointmentRepository,
    pub auth: AuthClient,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentRecord>,
}

/// The bearer token gating every admin route. The booking flow never
/// passes through here and stays unauthenticated.
fn bearer_token(headers: &HeaderMap) -> Result<String, (StatusCode, String)> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "Missing bearer token.".to_string(),
            )
        })
}

/// Handler exchanging admin credentials for a session.
#[axum::debug_handler]
pub async fn login_handler(
    State(state): State<Arc<SupabaseState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthSession>, (StatusCode, String)> {
    match state.auth.login(&payload.email, &payload.password).await {
        Ok(session) => Ok(Json(session)),
        Err(err) => {
            info!("Login failed for {}: {}", payload.email, err);
            Err(map_error(err))
        }
    }
}

/// Handler invalidating the current session.
#[axum::debug_handler]
pub async fn logout_handler(
    State(state): State<Arc<SupabaseState>>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    state.auth.logout(&token).await.map_err(map_error)?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out.".to_string(),
    }))
}

/// Handler listing every appointment, newest first.
#[axum::debug_handler]
pub async fn list_appointments_handler(
    State(state): State<Arc<SupabaseState>>,
    headers: HeaderMap,
) -> Result<Json<AppointmentListResponse>, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let appointments = state
        .repository
        .list(Some(&token))
        .await
        .map_err(map_error)?;
    Ok(Json(AppointmentListResponse { appointments }))
}

/// Handler creating an appointment from the admin dashboard.
#[axum::debug_handler]
pub async fn create_appointment_handler(
    State(state): State<Arc<SupabaseState>>,
    headers: HeaderMap,
    Json(payload): Json<NewAppointment>,
) -> Result<Json<AppointmentRecord>, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let record = state
        .repository
        .insert(&payload, Some(&token))
        .await
        .map_err(map_error)?;
    info!("Admin created appointment {}", record.id);
    Ok(Json(record))
}

/// Handler applying a partial update to one appointment.
#[axum::debug_handler]
pub async fn update_appointment_handler(
    State(state): State<Arc<SupabaseState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<AppointmentChanges>,
) -> Result<Json<AppointmentRecord>, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    let record = state
        .repository
        .update(id, &payload, Some(&token))
        .await
        .map_err(map_error)?;
    info!("Admin updated appointment {}", record.id);
    Ok(Json(record))
}

/// Handler deleting one appointment.
#[axum::debug_handler]
pub async fn delete_appointment_handler(
    State(state): State<Arc<SupabaseState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let token = bearer_token(&headers)?;
    state
        .repository
        .delete(id, Some(&token))
        .await
        .map_err(map_error)?;
    info!("Admin deleted appointment {}", id);
    Ok(Json(MessageResponse {
        success: true,
        message: "Appointment deleted.".to_string(),
    }))
}
