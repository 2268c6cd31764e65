// File: crates/agenda_supabase/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{AppointmentListResponse, LoginRequest, MessageResponse};
use agenda_common::services::{AppointmentChanges, AppointmentRecord, AuthSession, NewAppointment};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginRequest, example = json!({
        "email": "admin@example.com",
        "password": "hunter2"
    })),
    responses(
        (status = 200, description = "Session token", body = AuthSession),
        (status = 401, description = "Invalid credentials", body = String)
    )
)]
fn doc_login_handler() {}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session invalidated", body = MessageResponse),
        (status = 401, description = "Missing bearer token", body = String)
    )
)]
fn doc_logout_handler() {}

#[utoipa::path(
    get,
    path = "/admin/appointments",
    responses(
        (status = 200, description = "All appointments, newest first", body = AppointmentListResponse),
        (status = 401, description = "Missing bearer token", body = String)
    )
)]
fn doc_list_appointments_handler() {}

#[utoipa::path(
    post,
    path = "/admin/appointments",
    request_body = NewAppointment,
    responses(
        (status = 200, description = "Created appointment", body = AppointmentRecord),
        (status = 401, description = "Missing bearer token", body = String)
    )
)]
fn doc_create_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment id")),
    request_body = AppointmentChanges,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentRecord),
        (status = 404, description = "No such appointment", body = String)
    )
)]
fn doc_update_appointment_handler() {}

#[utoipa::path(
    delete,
    path = "/admin/appointments/{id}",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Missing bearer token", body = String)
    )
)]
fn doc_delete_appointment_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_login_handler,
        doc_logout_handler,
        doc_list_appointments_handler,
        doc_create_appointment_handler,
        doc_update_appointment_handler,
        doc_delete_appointment_handler
    ),
    components(
        schemas(
            LoginRequest,
            MessageResponse,
            AppointmentListResponse,
            AppointmentRecord,
            NewAppointment,
            AppointmentChanges,
            AuthSession
        )
    ),
    tags(
        (name = "admin", description = "Admin appointment management API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct AdminApiDoc;
