use std::sync::Arc;

use agenda_common::services::mock::{
    MockAppointmentStore, MockDocumentStorage, MockExportNotifier,
};
use agenda_config::AppConfig;
use agenda_scheduling::routes;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Datelike, Duration, Utc, Weekday};
use chrono_tz::America::Sao_Paulo;
use tower::ServiceExt;

// ── Helpers ──

fn test_config() -> Arc<AppConfig> {
    let json = serde_json::json!({
        "server": { "host": "127.0.0.1", "port": 0 },
        "scheduling": {
            "time_zone": "America/Sao_Paulo",
            "time_slots": ["09:00", "10:00", "14:00"]
        }
    });
    Arc::new(serde_json::from_value(json).unwrap())
}

struct TestApp {
    router: Router,
    store: Arc<MockAppointmentStore>,
    notifier: Arc<MockExportNotifier>,
}

fn test_app() -> TestApp {
    let store = Arc::new(MockAppointmentStore::new());
    let storage = Arc::new(MockDocumentStorage::new());
    let notifier = Arc::new(MockExportNotifier::new());
    let router = routes::routes(
        test_config(),
        store.clone(),
        storage,
        Some(notifier.clone()),
    );
    TestApp {
        router,
        store,
        notifier,
    }
}

/// A weekday at least a week out, so the booking date is always valid.
fn future_weekday() -> chrono::NaiveDate {
    let today = Utc::now().with_timezone(&Sao_Paulo).date_naive();
    let mut day = today + Duration::days(7);
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day += Duration::days(1);
    }
    day
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::String(
            String::from_utf8_lossy(&bytes).to_string(),
        ))
    };
    (status, value)
}

fn booking_body(date: chrono::NaiveDate, time: &str) -> serde_json::Value {
    serde_json::json!({
        "full_name": "Maria Souza",
        "cpf": "12345678901",
        "email": "maria@example.com",
        "phone": "11987654321",
        "date": date.format("%Y-%m-%d").to_string(),
        "time": time,
        "documents": [
            { "kind": "proof_of_residence", "url": "https://cdn.example.com/conta.pdf" },
            { "kind": "photo_id", "file_name": "rg.png", "content_type": "image/png",
              "data_base64": "aGVsbG8=" }
        ]
    })
}

// ── Tests ──

#[tokio::test]
async fn calendar_grid_has_blanks_plus_days() {
    let app = test_app();
    let (status, body) = send_json(&app.router, "GET", "/scheduling/calendar?month=2030-06", None).await;
    assert_eq!(status, StatusCode::OK);

    let cells = body["cells"].as_array().unwrap();
    // June 2030 starts on a Saturday: 6 blanks + 30 days
    assert_eq!(cells.len(), 36);
    assert!(cells[0]["day"].is_null());
    assert_eq!(cells[6]["day"], 1);
    // a Sunday cell is never selectable
    assert_eq!(cells[7]["selectable"], false);
}

#[tokio::test]
async fn calendar_rejects_bad_month() {
    let app = test_app();
    let (status, _) = send_json(&app.router, "GET", "/scheduling/calendar?month=junho", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slots_reflect_booked_state() {
    let app = test_app();
    let day = future_weekday();

    let uri = format!("/scheduling/slots?date={}", day.format("%Y-%m-%d"));
    let (status, body) = send_json(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|s| s["booked"] == false));

    // book 14:00, then the slot list must flag it
    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "14:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_json(&app.router, "GET", &uri, None).await;
    let slots = body["slots"].as_array().unwrap();
    let booked_slot = slots.iter().find(|s| s["label"] == "14:00").unwrap();
    assert_eq!(booked_slot["booked"], true);
    assert_eq!(booked_slot["selectable"], false);
}

#[tokio::test]
async fn booking_persists_and_exports() {
    let app = test_app();
    let day = future_weekday();

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["appointment_id"], 1);

    assert_eq!(app.store.records().len(), 1);
    assert_eq!(app.notifier.rows().len(), 1);
}

#[tokio::test]
async fn double_booking_the_same_slot_is_conflict() {
    let app = test_app();
    let day = future_weekday();

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the session must be reset before another booking may start
    let (status, _) = send_json(&app.router, "POST", "/scheduling/reset", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.store.records().len(), 1);
}

#[tokio::test]
async fn validation_errors_are_bad_request() {
    let app = test_app();
    let day = future_weekday();
    let mut body = booking_body(day, "09:00");
    body["cpf"] = serde_json::json!("123");

    let (status, message) = send_json(&app.router, "POST", "/scheduling/book", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message.as_str().unwrap().contains("cpf"));
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn unknown_time_and_weekend_days_are_rejected() {
    let app = test_app();
    let day = future_weekday();

    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "03:30")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut saturday = day;
    while saturday.weekday() != Weekday::Sat {
        saturday += Duration::days(1);
    }
    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(saturday, "09:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn draft_selection_drives_a_booking() {
    let app = test_app();
    let day = future_weekday();
    let day_string = day.format("%Y-%m-%d").to_string();

    // select day, then time
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/scheduling/draft/day",
        Some(serde_json::json!({ "date": day_string })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected_date"], day_string);
    assert!(body["tentative_slot"].is_null());

    let (status, body) = send_json(
        &app.router,
        "POST",
        "/scheduling/draft/time",
        Some(serde_json::json!({ "time": "10:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["tentative_slot"].is_null());

    // book with no explicit date/time: the draft's tentative slot is used
    let mut booking = booking_body(day, "10:00");
    booking["date"] = serde_json::Value::Null;
    booking["time"] = serde_json::Value::Null;
    let (status, body) = send_json(&app.router, "POST", "/scheduling/book", Some(booking)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // the draft selection is consumed by the confirmation
    let (_, body) = send_json(&app.router, "GET", "/scheduling/draft", None).await;
    assert!(body["selected_date"].is_null());
    assert!(body["tentative_slot"].is_null());
}

#[tokio::test]
async fn weekend_selection_leaves_the_draft_untouched() {
    let app = test_app();
    let day = future_weekday();
    let day_string = day.format("%Y-%m-%d").to_string();

    send_json(
        &app.router,
        "POST",
        "/scheduling/draft/day",
        Some(serde_json::json!({ "date": day_string })),
    )
    .await;

    let mut saturday = day;
    while saturday.weekday() != Weekday::Sat {
        saturday += Duration::days(1);
    }
    let (status, _) = send_json(
        &app.router,
        "POST",
        "/scheduling/draft/day",
        Some(serde_json::json!({ "date": saturday.format("%Y-%m-%d").to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send_json(&app.router, "GET", "/scheduling/draft", None).await;
    assert_eq!(body["selected_date"], day_string);
}

#[tokio::test]
async fn month_navigation_clears_the_draft_selection() {
    let app = test_app();
    let day = future_weekday();

    send_json(
        &app.router,
        "POST",
        "/scheduling/draft/day",
        Some(serde_json::json!({ "date": day.format("%Y-%m-%d").to_string() })),
    )
    .await;
    let (status, body) = send_json(
        &app.router,
        "POST",
        "/scheduling/draft/month",
        Some(serde_json::json!({ "direction": "next" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["selected_date"].is_null());
    assert!(body["selected_time"].is_null());

    // booking with no selection is rejected before any side effect
    let mut booking = booking_body(day, "09:00");
    booking["date"] = serde_json::Value::Null;
    booking["time"] = serde_json::Value::Null;
    let (status, _) = send_json(&app.router, "POST", "/scheduling/book", Some(booking)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.records().is_empty());
}

#[tokio::test]
async fn status_endpoint_tracks_the_machine() {
    let app = test_app();
    let day = future_weekday();

    let (_, body) = send_json(&app.router, "GET", "/scheduling/status", None).await;
    assert_eq!(body["status"], "idle");
    assert!(body["confirmed_slot"].is_null());

    send_json(
        &app.router,
        "POST",
        "/scheduling/book",
        Some(booking_body(day, "14:00")),
    )
    .await;

    let (_, body) = send_json(&app.router, "GET", "/scheduling/status", None).await;
    assert_eq!(body["status"], "success");
    assert!(!body["confirmed_slot"].is_null());
    assert_eq!(body["booked_slots"].as_array().unwrap().len(), 1);

    // reset keeps the booked set, clears the confirmation
    let (_, body) = send_json(&app.router, "POST", "/scheduling/reset", None).await;
    assert_eq!(body["status"], "idle");
    assert!(body["confirmed_slot"].is_null());
    assert_eq!(body["booked_slots"].as_array().unwrap().len(), 1);
}
