// File: crates/agenda_scheduling/src/handlers.rs
use crate::draft::BookingDraft;
use crate::error::SchedulingError;
use crate::flow::{confirm_booking, BookingSession, BookingStatus, UploadTracker};
use crate::intake::{ClientPayload, DocumentKind, DocumentSet, DocumentSource};
use crate::policy::{is_day_selectable, SlotTime};
use agenda_common::map_error;
use agenda_common::services::{AppointmentStore, BoxedError, DocumentStorage, ExportNotifier};
use agenda_config::AppConfig;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// Shared state for the scheduling routes. One booking session per
// service instance: the widget serves a single interactive client.
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub time_zone: Tz,
    pub slots: Vec<SlotTime>,
    pub store: Arc<dyn AppointmentStore<Error = BoxedError>>,
    pub storage: Arc<dyn DocumentStorage<Error = BoxedError>>,
    pub notifier: Option<Arc<dyn ExportNotifier<Error = BoxedError>>>,
    // Lock order where both are needed: draft first, then session.
    pub draft: tokio::sync::Mutex<BookingDraft>,
    pub session: tokio::sync::Mutex<BookingSession>,
}

impl SchedulingState {
    /// "Today" in the office timezone, date only.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.time_zone).date_naive()
    }
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarQuery {
    /// Month to render, "YYYY-MM". Defaults to the current month.
    pub month: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarCellView {
    /// Day of month; null for leading padding cells.
    pub day: Option<u32>,
    /// Full date; null for leading padding cells.
    pub date: Option<NaiveDate>,
    pub selectable: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CalendarResponse {
    /// First day of the rendered month.
    pub month: NaiveDate,
    pub today: NaiveDate,
    pub cells: Vec<CalendarCellView>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SlotsQuery {
    /// Day to list times for, "YYYY-MM-DD".
    pub date: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotView {
    pub label: String,
    /// The candidate timestamp in office-local time.
    pub datetime: NaiveDateTime,
    pub booked: bool,
    pub selectable: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotView>,
}

/// One attached document in a booking request: either a URL of an
/// already-stored object, or inline base64 content to upload.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DocumentUpload {
    /// "proof_of_residence", "photo_id" or "other_documents".
    pub kind: String,
    pub url: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data_base64: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookSlotRequest {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    /// Selected day, "YYYY-MM-DD". Omit both date and time to confirm
    /// the slot currently selected in the draft.
    pub date: Option<String>,
    /// Selected time, one of the configured slot labels.
    pub time: Option<String>,
    #[serde(default)]
    pub documents: Vec<DocumentUpload>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub appointment_id: Option<i64>,
    pub confirmed_slot: Option<NaiveDateTime>,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectDayRequest {
    /// "YYYY-MM-DD"
    pub date: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SelectTimeRequest {
    /// One of the configured slot labels.
    pub time: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MonthNavRequest {
    /// "next" or "prev"
    pub direction: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DraftView {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    /// Present only when both date and time are selected.
    pub tentative_slot: Option<NaiveDateTime>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionStatusResponse {
    pub status: BookingStatus,
    pub confirmed_slot: Option<NaiveDateTime>,
    pub booked_slots: Vec<NaiveDateTime>,
    pub uploads: UploadTracker,
}

/// Handler returning the month grid with per-day selectability.
#[axum::debug_handler]
pub async fn get_calendar_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, (StatusCode, String)> {
    let today = state.today();
    let reference = match &query.month {
        Some(month) => NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").map_err(
            |_| {
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid month format (YYYY-MM)".to_string(),
                )
            },
        )?,
        None => today,
    };

    // The draft is rebuilt per request: the grid is re-derivable from the
    // reference date alone.
    let draft = BookingDraft::new(reference);
    let cells = draft
        .grid()
        .map(|cell| match cell.date() {
            Some(date) => CalendarCellView {
                day: Some(chrono::Datelike::day(&date)),
                date: Some(date),
                selectable: is_day_selectable(date, today),
            },
            None => CalendarCellView {
                day: None,
                date: None,
                selectable: false,
            },
        })
        .collect();

    Ok(Json(CalendarResponse {
        month: draft.displayed_month(),
        today,
        cells,
    }))
}

/// Handler returning the configured times of one day with booked flags.
#[axum::debug_handler]
pub async fn get_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })?;
    let today = state.today();
    let day_open = is_day_selectable(date, today);

    let session = state.session.lock().await;
    let slots = state
        .slots
        .iter()
        .map(|slot| {
            let datetime = date.and_time(slot.time);
            let booked = session.booked().contains(datetime);
            SlotView {
                label: slot.label.clone(),
                datetime,
                booked,
                selectable: day_open && !booked,
            }
        })
        .collect();

    Ok(Json(SlotsResponse { date, slots }))
}

fn draft_view(draft: &BookingDraft) -> DraftView {
    DraftView {
        month: draft.displayed_month(),
        selected_date: draft.selected_date(),
        selected_time: draft.selected_time().map(|slot| slot.label.clone()),
        tentative_slot: draft.tentative_slot(),
    }
}

/// Handler returning the current draft selection.
#[axum::debug_handler]
pub async fn get_draft_handler(State(state): State<Arc<SchedulingState>>) -> Json<DraftView> {
    let draft = state.draft.lock().await;
    Json(draft_view(&draft))
}

/// Handler selecting a day; clears any previously selected time.
#[axum::debug_handler]
pub async fn select_day_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<SelectDayRequest>,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)".to_string(),
        )
    })?;
    let mut draft = state.draft.lock().await;
    draft.select_day(date, state.today()).map_err(map_error)?;
    Ok(Json(draft_view(&draft)))
}

/// Handler selecting a time for the already-selected day.
#[axum::debug_handler]
pub async fn select_time_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<SelectTimeRequest>,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    let slot = state
        .slots
        .iter()
        .find(|slot| slot.label == payload.time)
        .cloned()
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("'{}' is not one of the bookable times", payload.time),
            )
        })?;
    let mut draft = state.draft.lock().await;
    let session = state.session.lock().await;
    draft
        .select_time(slot, session.booked())
        .map_err(map_error)?;
    Ok(Json(draft_view(&draft)))
}

/// Handler flipping the displayed month; clears the whole selection.
#[axum::debug_handler]
pub async fn navigate_month_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<MonthNavRequest>,
) -> Result<Json<DraftView>, (StatusCode, String)> {
    let mut draft = state.draft.lock().await;
    match payload.direction.as_str() {
        "next" => draft.next_month(),
        "prev" => draft.prev_month(),
        other => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown direction '{}' (expected next or prev)", other),
            ))
        }
    }
    Ok(Json(draft_view(&draft)))
}

/// Handler running the whole booking submission.
///
/// The candidate slot comes from the request when date and time are
/// given explicitly, otherwise from the session draft's tentative slot.
#[axum::debug_handler]
pub async fn book_slot_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    let candidate = match (payload.date.as_deref(), payload.time.as_deref()) {
        (Some(date), Some(time)) => {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid date format (YYYY-MM-DD)".to_string(),
                )
            })?;
            let slot = state
                .slots
                .iter()
                .find(|slot| slot.label == time)
                .ok_or_else(|| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("'{}' is not one of the bookable times", time),
                    )
                })?;
            if !is_day_selectable(date, state.today()) {
                return Err(map_error(SchedulingError::DayNotSelectable));
            }
            date.and_time(slot.time)
        }
        (None, None) => {
            let draft = state.draft.lock().await;
            draft.tentative_slot().ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    "No slot selected: pick a date and a time first.".to_string(),
                )
            })?
        }
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Provide both date and time, or neither to book the current selection."
                    .to_string(),
            ))
        }
    };

    let documents = parse_documents(&payload.documents)?;
    let client = ClientPayload {
        full_name: payload.full_name,
        cpf: payload.cpf,
        email: payload.email,
        phone: payload.phone,
        documents,
    };

    let mut session = state.session.lock().await;
    match confirm_booking(
        &mut session,
        &client,
        candidate,
        state.time_zone,
        state.store.as_ref(),
        state.storage.as_ref(),
        state.notifier.as_deref(),
    )
    .await
    {
        Ok(confirmed) => {
            info!("Appointment {} booked for {}", confirmed.record.id, confirmed.slot);
            drop(session);
            state.draft.lock().await.clear();
            Ok(Json(BookingResponse {
                success: true,
                appointment_id: Some(confirmed.record.id),
                confirmed_slot: Some(confirmed.slot),
                message: "Appointment booked successfully.".to_string(),
            }))
        }
        Err(err) => {
            info!("Booking rejected: {}", err);
            Err(map_error(err))
        }
    }
}

/// Handler exposing the session status machine to the UI.
#[axum::debug_handler]
pub async fn get_session_status_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Json<SessionStatusResponse> {
    let session = state.session.lock().await;
    Json(SessionStatusResponse {
        status: session.status(),
        confirmed_slot: session.confirmed_slot(),
        booked_slots: session.booked().iter().copied().collect(),
        uploads: session.uploads().clone(),
    })
}

/// Handler returning the session to idle for another booking. The draft
/// selection is dropped along with the confirmation.
#[axum::debug_handler]
pub async fn reset_session_handler(
    State(state): State<Arc<SchedulingState>>,
) -> Json<SessionStatusResponse> {
    let mut draft = state.draft.lock().await;
    let mut session = state.session.lock().await;
    draft.clear();
    session.reset();
    Json(SessionStatusResponse {
        status: session.status(),
        confirmed_slot: session.confirmed_slot(),
        booked_slots: session.booked().iter().copied().collect(),
        uploads: session.uploads().clone(),
    })
}

fn parse_documents(uploads: &[DocumentUpload]) -> Result<DocumentSet, (StatusCode, String)> {
    let mut documents = DocumentSet::default();
    for upload in uploads {
        let kind = DocumentKind::from_field_name(&upload.kind).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("Unknown document kind '{}'", upload.kind),
            )
        })?;
        let source = if let Some(url) = &upload.url {
            DocumentSource::Url(url.clone())
        } else {
            let file_name = upload.file_name.clone().ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Document '{}' is missing file_name", upload.kind),
                )
            })?;
            let data = upload
                .data_base64
                .as_deref()
                .ok_or_else(|| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Document '{}' is missing data_base64", upload.kind),
                    )
                })
                .and_then(|encoded| {
                    BASE64.decode(encoded).map_err(|_| {
                        (
                            StatusCode::BAD_REQUEST,
                            format!("Document '{}' has invalid base64 content", upload.kind),
                        )
                    })
                })?;
            DocumentSource::Bytes {
                file_name,
                content_type: upload
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
                data,
            }
        };
        documents.set(kind, source);
    }
    Ok(documents)
}
