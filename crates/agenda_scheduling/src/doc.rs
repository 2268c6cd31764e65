// File: crates/agenda_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::flow::{BookingStatus, UploadProgress, UploadState, UploadTracker};
use crate::handlers::{
    BookSlotRequest, BookingResponse, CalendarCellView, CalendarQuery, CalendarResponse,
    DocumentUpload, DraftView, MonthNavRequest, SelectDayRequest, SelectTimeRequest,
    SessionStatusResponse, SlotView, SlotsQuery, SlotsResponse,
};

#[utoipa::path(
    get,
    path = "/scheduling/calendar",
    params(
        ("month" = Option<String>, Query, description = "Month to render, YYYY-MM; defaults to the current month", example = "2024-06")
    ),
    responses(
        (status = 200, description = "Month grid with per-day selectability", body = CalendarResponse),
        (status = 400, description = "Invalid month format", body = String)
    )
)]
fn doc_get_calendar_handler() {}

#[utoipa::path(
    get,
    path = "/scheduling/slots",
    params(
        ("date" = String, Query, description = "Day to list times for, YYYY-MM-DD", example = "2024-06-10", format = "date")
    ),
    responses(
        (status = 200, description = "Configured times with booked flags", body = SlotsResponse),
        (status = 400, description = "Invalid date format", body = String)
    )
)]
fn doc_get_slots_handler() {}

#[utoipa::path(
    get,
    path = "/scheduling/draft",
    responses(
        (status = 200, description = "Current draft selection", body = DraftView)
    )
)]
fn doc_get_draft_handler() {}

#[utoipa::path(
    post,
    path = "/scheduling/draft/day",
    request_body(content = SelectDayRequest, example = json!({ "date": "2024-06-10" })),
    responses(
        (status = 200, description = "Day selected, time cleared", body = DraftView),
        (status = 409, description = "Past day or weekend", body = String)
    )
)]
fn doc_select_day_handler() {}

#[utoipa::path(
    post,
    path = "/scheduling/draft/time",
    request_body(content = SelectTimeRequest, example = json!({ "time": "14:00" })),
    responses(
        (status = 200, description = "Time selected", body = DraftView),
        (status = 400, description = "No day selected or unknown time", body = String),
        (status = 409, description = "Slot already booked", body = String)
    )
)]
fn doc_select_time_handler() {}

#[utoipa::path(
    post,
    path = "/scheduling/draft/month",
    request_body(content = MonthNavRequest, example = json!({ "direction": "next" })),
    responses(
        (status = 200, description = "Month changed, selection cleared", body = DraftView)
    )
)]
fn doc_navigate_month_handler() {}

#[utoipa::path(
    post,
    path = "/scheduling/book",
    request_body(content = BookSlotRequest, example = json!({
        "full_name": "Maria Souza",
        "cpf": "12345678901",
        "email": "maria@example.com",
        "phone": "11987654321",
        "date": "2024-06-10",
        "time": "14:00",
        "documents": [
            { "kind": "proof_of_residence", "url": "https://example.supabase.co/storage/v1/object/public/documents/Maria_Souza/proof_of_residence-1717689600000-conta.pdf" },
            { "kind": "photo_id", "file_name": "rg.png", "content_type": "image/png", "data_base64": "iVBORw0KGgo=" }
        ]
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse,
         example = json!({
             "success": true,
             "appointment_id": 42,
             "confirmed_slot": "2024-06-10T14:00:00",
             "message": "Appointment booked successfully."
         })
        ),
        (status = 400, description = "Validation failure", body = String),
        (status = 409, description = "Slot taken or submission in flight", body = String),
        (status = 502, description = "Document upload failed", body = String),
        (status = 500, description = "Persistence failed", body = String)
    )
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    get,
    path = "/scheduling/status",
    responses(
        (status = 200, description = "Session status machine", body = SessionStatusResponse)
    )
)]
fn doc_get_session_status_handler() {}

#[utoipa::path(
    post,
    path = "/scheduling/reset",
    responses(
        (status = 200, description = "Session returned to idle", body = SessionStatusResponse)
    )
)]
fn doc_reset_session_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_calendar_handler,
        doc_get_slots_handler,
        doc_get_draft_handler,
        doc_select_day_handler,
        doc_select_time_handler,
        doc_navigate_month_handler,
        doc_book_slot_handler,
        doc_get_session_status_handler,
        doc_reset_session_handler
    ),
    components(
        schemas(
            CalendarQuery,
            CalendarResponse,
            CalendarCellView,
            SlotsQuery,
            SlotsResponse,
            SlotView,
            SelectDayRequest,
            SelectTimeRequest,
            MonthNavRequest,
            DraftView,
            BookSlotRequest,
            DocumentUpload,
            BookingResponse,
            SessionStatusResponse,
            BookingStatus,
            UploadState,
            UploadProgress,
            UploadTracker
        )
    ),
    tags(
        (name = "scheduling", description = "Appointment booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct SchedulingApiDoc;
