// --- File: crates/agenda_scheduling/src/routes.rs ---

use crate::draft::BookingDraft;
use crate::flow::BookingSession;
use crate::handlers::{
    book_slot_handler, get_calendar_handler, get_draft_handler, get_session_status_handler,
    get_slots_handler, navigate_month_handler, reset_session_handler, select_day_handler,
    select_time_handler, SchedulingState,
};
use crate::policy::parse_time_slots;
use agenda_common::services::{AppointmentStore, BoxedError, DocumentStorage, ExportNotifier};
use agenda_config::AppConfig;
use axum::{
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// The collaborators come from the service factory; the scheduling rules
/// (timezone, slot list) come from config and are validated here, at
/// startup, rather than per request.
pub fn routes(
    config: Arc<AppConfig>,
    store: Arc<dyn AppointmentStore<Error = BoxedError>>,
    storage: Arc<dyn DocumentStorage<Error = BoxedError>>,
    notifier: Option<Arc<dyn ExportNotifier<Error = BoxedError>>>,
) -> Router {
    let time_zone = config
        .scheduling
        .time_zone
        .parse::<Tz>()
        .expect("invalid scheduling.time_zone in config");
    let slots =
        parse_time_slots(&config.scheduling.time_slots).expect("invalid scheduling.time_slots");

    let today = chrono::Utc::now().with_timezone(&time_zone).date_naive();
    let state = Arc::new(SchedulingState {
        config,
        time_zone,
        slots,
        store,
        storage,
        notifier,
        draft: tokio::sync::Mutex::new(BookingDraft::new(today)),
        session: tokio::sync::Mutex::new(BookingSession::new()),
    });

    Router::new()
        .route("/scheduling/calendar", get(get_calendar_handler))
        .route("/scheduling/slots", get(get_slots_handler))
        .route("/scheduling/draft", get(get_draft_handler))
        .route("/scheduling/draft/day", post(select_day_handler))
        .route("/scheduling/draft/time", post(select_time_handler))
        .route("/scheduling/draft/month", post(navigate_month_handler))
        .route("/scheduling/book", post(book_slot_handler))
        .route("/scheduling/status", get(get_session_status_handler))
        .route("/scheduling/reset", post(reset_session_handler))
        .with_state(state)
}
