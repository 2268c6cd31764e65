// --- File: crates/agenda_scheduling/src/flow.rs ---
//! Booking submission flow.
//!
//! Drives the idle → submitting → success status machine. While
//! submitting, side effects run in order: pending documents upload in
//! parallel (all-or-nothing), one appointment record is persisted, and
//! the export notifier fires best-effort. Upload or persistence failure
//! reverts the session to idle for retry; a notifier failure is logged
//! and swallowed. The session object is always passed in by the caller,
//! there is no ambient mutable state.

use crate::error::SchedulingError;
use crate::intake::{object_path, ClientPayload, DocumentKind, DocumentSource};
use crate::policy::BookedSlotSet;
use agenda_common::services::{
    AppointmentRecord, AppointmentStore, BoxedError, DocumentStorage, ExportNotifier, ExportRow,
    NewAppointment,
};
use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{info, warn};

/// Submission status, owned by the flow and consumed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// Per-document upload state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    #[default]
    Idle,
    Selected,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadProgress {
    pub state: UploadState,
    pub percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Upload progress per fixed document slot.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadTracker {
    pub proof_of_residence: UploadProgress,
    pub photo_id: UploadProgress,
    pub other_documents: UploadProgress,
}

impl UploadTracker {
    pub fn get(&self, kind: DocumentKind) -> &UploadProgress {
        match kind {
            DocumentKind::ProofOfResidence => &self.proof_of_residence,
            DocumentKind::PhotoId => &self.photo_id,
            DocumentKind::OtherDocuments => &self.other_documents,
        }
    }

    fn mark(&mut self, kind: DocumentKind, state: UploadState, percent: u8, error: Option<String>) {
        let progress = UploadProgress {
            state,
            percent,
            error,
        };
        match kind {
            DocumentKind::ProofOfResidence => self.proof_of_residence = progress,
            DocumentKind::PhotoId => self.photo_id = progress,
            DocumentKind::OtherDocuments => self.other_documents = progress,
        }
    }
}

/// The session-scoped booking state: status, the slots committed so far,
/// the confirmed slot and per-document upload progress.
#[derive(Debug, Clone, Default)]
pub struct BookingSession {
    status: BookingStatus,
    booked: BookedSlotSet,
    confirmed_slot: Option<NaiveDateTime>,
    uploads: UploadTracker,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn booked(&self) -> &BookedSlotSet {
        &self.booked
    }

    pub fn confirmed_slot(&self) -> Option<NaiveDateTime> {
        self.confirmed_slot
    }

    pub fn uploads(&self) -> &UploadTracker {
        &self.uploads
    }

    /// Return to idle for another booking. The booked-slot set is kept:
    /// it never shrinks within a session.
    pub fn reset(&mut self) {
        self.status = BookingStatus::Idle;
        self.confirmed_slot = None;
        self.uploads = UploadTracker::default();
    }
}

/// The outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct ConfirmedBooking {
    pub record: AppointmentRecord,
    /// The confirmed slot in office-local time.
    pub slot: NaiveDateTime,
}

/// Run one booking submission against the given collaborators.
///
/// Guards first: no submission may start while one is in flight or after
/// the session already holds a confirmed booking, a candidate already in
/// the booked set is rejected, and the payload must validate. Then, in
/// order: parallel document uploads, the record insert, the best-effort
/// export.
#[allow(clippy::too_many_arguments)]
pub async fn confirm_booking(
    session: &mut BookingSession,
    payload: &ClientPayload,
    candidate: NaiveDateTime,
    time_zone: Tz,
    store: &dyn AppointmentStore<Error = BoxedError>,
    storage: &dyn DocumentStorage<Error = BoxedError>,
    notifier: Option<&dyn ExportNotifier<Error = BoxedError>>,
) -> Result<ConfirmedBooking, SchedulingError> {
    // --- Guards ---
    match session.status {
        BookingStatus::Submitting => return Err(SchedulingError::SubmissionInProgress),
        BookingStatus::Success => return Err(SchedulingError::SessionComplete),
        BookingStatus::Idle => {}
    }
    if session.booked.contains(candidate) {
        return Err(SchedulingError::SlotTaken);
    }
    payload.validate().map_err(|errors| {
        SchedulingError::Validation(
            errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;
    let appointment_utc = time_zone
        .from_local_datetime(&candidate)
        .earliest()
        .ok_or_else(|| {
            SchedulingError::TimeParse(format!("{} is not a valid local time", candidate))
        })?
        .with_timezone(&Utc);

    session.status = BookingStatus::Submitting;
    for kind in DocumentKind::ALL {
        match payload.documents.get(kind) {
            Some(DocumentSource::Bytes { .. }) => {
                session.uploads.mark(kind, UploadState::Uploading, 0, None)
            }
            // Pre-supplied URLs need no upload step.
            Some(DocumentSource::Url(_)) => {
                session.uploads.mark(kind, UploadState::Success, 100, None)
            }
            None => session.uploads.mark(kind, UploadState::Idle, 0, None),
        }
    }

    // --- 1. Upload pending documents (fan-out, join before proceeding) ---
    let stamp = Utc::now().timestamp_millis();
    let (proof, photo, other) = tokio::join!(
        upload_document(storage, payload, DocumentKind::ProofOfResidence, stamp),
        upload_document(storage, payload, DocumentKind::PhotoId, stamp),
        upload_document(storage, payload, DocumentKind::OtherDocuments, stamp),
    );

    let mut urls: [Option<String>; 3] = [None, None, None];
    let mut first_failure: Option<String> = None;
    for (slot, (kind, result)) in urls.iter_mut().zip([
        (DocumentKind::ProofOfResidence, proof),
        (DocumentKind::PhotoId, photo),
        (DocumentKind::OtherDocuments, other),
    ]) {
        match result {
            Ok(url) => {
                if url.is_some() {
                    session.uploads.mark(kind, UploadState::Success, 100, None);
                }
                *slot = url;
            }
            Err(message) => {
                session
                    .uploads
                    .mark(kind, UploadState::Error, 0, Some(message.clone()));
                first_failure.get_or_insert(message);
            }
        }
    }
    // All-or-nothing: one failed upload aborts the submission even though
    // uploads that already finished are not retracted from storage.
    if let Some(message) = first_failure {
        session.status = BookingStatus::Idle;
        return Err(SchedulingError::Upload(message));
    }
    let [proof_url, photo_url, other_url] = urls;

    // --- 2. Persist the appointment record ---
    let new_appointment = NewAppointment {
        full_name: payload.full_name.clone(),
        cpf: payload.cpf.clone(),
        email: payload.email.clone(),
        phone: payload.phone.clone(),
        appointment_datetime: appointment_utc,
        proof_of_residence_url: proof_url,
        photo_id_url: photo_url,
        other_documents_url: other_url,
    };
    let record = match store.insert(new_appointment).await {
        Ok(record) => record,
        Err(err) => {
            session.status = BookingStatus::Idle;
            return Err(SchedulingError::Persistence(err.to_string()));
        }
    };

    // --- 3. Best-effort export; never rolls back the persisted record ---
    if let Some(notifier) = notifier {
        if let Err(err) = notifier.notify(export_row(&record, candidate)).await {
            warn!("Export notification failed, booking kept: {}", err);
        }
    }

    session.booked.insert(candidate);
    session.confirmed_slot = Some(candidate);
    session.status = BookingStatus::Success;
    info!("Booking confirmed for {}", candidate);

    Ok(ConfirmedBooking {
        record,
        slot: candidate,
    })
}

async fn upload_document(
    storage: &dyn DocumentStorage<Error = BoxedError>,
    payload: &ClientPayload,
    kind: DocumentKind,
    stamp: i64,
) -> Result<Option<String>, String> {
    match payload.documents.get(kind) {
        None => Ok(None),
        Some(DocumentSource::Url(url)) => Ok(Some(url.clone())),
        Some(DocumentSource::Bytes {
            file_name,
            content_type,
            data,
        }) => {
            let path = object_path(&payload.full_name, kind, stamp, file_name);
            storage
                .upload(&path, data.clone(), content_type)
                .await
                .map(Some)
                .map_err(|err| err.to_string())
        }
    }
}

/// The flat row shipped to the export endpoint. Field names match the
/// spreadsheet columns the office already uses.
pub fn export_row(record: &AppointmentRecord, slot_local: NaiveDateTime) -> ExportRow {
    let mut row = ExportRow::new();
    row.insert("fullName".to_string(), record.full_name.clone());
    row.insert("cpf".to_string(), record.cpf.clone());
    row.insert("email".to_string(), record.email.clone());
    row.insert("phone".to_string(), record.phone.clone());
    row.insert(
        "appointmentDateTime".to_string(),
        slot_local.format("%d/%m/%Y %H:%M").to_string(),
    );
    row.insert(
        "proof_of_residence_url".to_string(),
        record.proof_of_residence_url.clone().unwrap_or_default(),
    );
    row.insert(
        "photo_id_url".to_string(),
        record.photo_id_url.clone().unwrap_or_default(),
    );
    row.insert(
        "other_documents_url".to_string(),
        record.other_documents_url.clone().unwrap_or_default(),
    );
    row
}
