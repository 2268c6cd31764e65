// --- File: crates/agenda_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! This module provides trait definitions for the collaborators the booking
//! flow depends on: the appointment store, the document storage, the export
//! notifier and the auth gateway. These traits allow for dependency injection
//! and easier testing by decoupling the scheduling logic from the hosted
//! backend that implements them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// One persisted appointment, exactly as the store returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    /// The booked slot, UTC, minute resolution.
    pub appointment_datetime: DateTime<Utc>,
    pub proof_of_residence_url: Option<String>,
    pub photo_id_url: Option<String>,
    pub other_documents_url: Option<String>,
}

/// The insert payload for one appointment; id and creation time are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewAppointment {
    pub full_name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub appointment_datetime: DateTime<Utc>,
    pub proof_of_residence_url: Option<String>,
    pub photo_id_url: Option<String>,
    pub other_documents_url: Option<String>,
}

/// Partial update for one appointment. Only the present fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppointmentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_datetime: Option<DateTime<Utc>>,
}

/// An authenticated admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// The flat field-name-to-string mapping the export notifier ships.
pub type ExportRow = BTreeMap<String, String>;

/// A trait for appointment persistence.
///
/// Insert is used by the booking flow; update, delete and list serve the
/// admin surface. Ordering of `list` is newest appointment first.
pub trait AppointmentStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one appointment and return it with server-assigned fields.
    fn insert(&self, appointment: NewAppointment)
        -> BoxFuture<'_, AppointmentRecord, Self::Error>;

    /// Apply a partial update to an existing appointment.
    fn update(
        &self,
        id: i64,
        changes: AppointmentChanges,
    ) -> BoxFuture<'_, AppointmentRecord, Self::Error>;

    /// Delete an appointment.
    fn delete(&self, id: i64) -> BoxFuture<'_, (), Self::Error>;

    /// All appointments, ordered by appointment time, newest first.
    fn list(&self) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error>;
}

/// A trait for document blob storage.
pub trait DocumentStorage: Send + Sync {
    /// Error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Upload one object and return its public URL.
    fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> BoxFuture<'_, String, Self::Error>;

    /// The public URL an object at `path` would be served from.
    fn public_url(&self, path: &str) -> String;
}

/// A trait for the best-effort export notifier.
///
/// Callers must treat a failure here as non-fatal: log it and move on.
pub trait ExportNotifier: Send + Sync {
    /// Error type returned by the notifier.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ship one flat row to the export endpoint.
    fn notify(&self, row: ExportRow) -> BoxFuture<'_, (), Self::Error>;
}

/// A trait for the auth collaborator gating the admin surface.
pub trait AuthGateway: Send + Sync {
    /// Error type returned by auth operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exchange credentials for a session.
    fn login(&self, email: &str, password: &str) -> BoxFuture<'_, AuthSession, Self::Error>;

    /// Invalidate a session.
    fn logout(&self, access_token: &str) -> BoxFuture<'_, (), Self::Error>;
}

/// A factory for creating service instances.
///
/// Each accessor returns `None` when the corresponding integration is
/// disabled or unconfigured; callers decide whether that is an error.
pub trait ServiceFactory: Send + Sync {
    /// Get the appointment store instance.
    fn appointment_store(&self) -> Option<Arc<dyn AppointmentStore<Error = BoxedError>>>;

    /// Get the document storage instance.
    fn document_storage(&self) -> Option<Arc<dyn DocumentStorage<Error = BoxedError>>>;

    /// Get the export notifier instance.
    fn export_notifier(&self) -> Option<Arc<dyn ExportNotifier<Error = BoxedError>>>;

    /// Get the auth gateway instance.
    fn auth_gateway(&self) -> Option<Arc<dyn AuthGateway<Error = BoxedError>>>;
}

pub mod mock {
    //! In-memory collaborator implementations for tests.

    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Error type shared by the mock services.
    #[derive(Debug)]
    pub struct MockServiceError(pub String);

    impl fmt::Display for MockServiceError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl StdError for MockServiceError {}

    fn boxed(message: impl Into<String>) -> BoxedError {
        BoxedError(Box::new(MockServiceError(message.into())))
    }

    /// Recording appointment store with optional insert failure.
    pub struct MockAppointmentStore {
        records: Mutex<Vec<AppointmentRecord>>,
        next_id: Mutex<i64>,
        fail_inserts: AtomicBool,
    }

    impl Default for MockAppointmentStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockAppointmentStore {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
                fail_inserts: AtomicBool::new(false),
            }
        }

        /// Make every subsequent insert fail.
        pub fn fail_inserts(&self) {
            self.fail_inserts.store(true, Ordering::SeqCst);
        }

        /// Snapshot of everything inserted so far.
        pub fn records(&self) -> Vec<AppointmentRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    impl AppointmentStore for MockAppointmentStore {
        type Error = BoxedError;

        fn insert(
            &self,
            appointment: NewAppointment,
        ) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
            Box::pin(async move {
                if self.fail_inserts.load(Ordering::SeqCst) {
                    return Err(boxed("insert failed"));
                }
                let mut next_id = self.next_id.lock().unwrap();
                let record = AppointmentRecord {
                    id: *next_id,
                    created_at: Utc::now(),
                    full_name: appointment.full_name,
                    cpf: appointment.cpf,
                    email: appointment.email,
                    phone: appointment.phone,
                    appointment_datetime: appointment.appointment_datetime,
                    proof_of_residence_url: appointment.proof_of_residence_url,
                    photo_id_url: appointment.photo_id_url,
                    other_documents_url: appointment.other_documents_url,
                };
                *next_id += 1;
                self.records.lock().unwrap().push(record.clone());
                Ok(record)
            })
        }

        fn update(
            &self,
            id: i64,
            changes: AppointmentChanges,
        ) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
            Box::pin(async move {
                let mut records = self.records.lock().unwrap();
                let record = records
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or_else(|| boxed(format!("appointment {} not found", id)))?;
                if let Some(full_name) = changes.full_name {
                    record.full_name = full_name;
                }
                if let Some(cpf) = changes.cpf {
                    record.cpf = cpf;
                }
                if let Some(email) = changes.email {
                    record.email = email;
                }
                if let Some(phone) = changes.phone {
                    record.phone = phone;
                }
                if let Some(when) = changes.appointment_datetime {
                    record.appointment_datetime = when;
                }
                Ok(record.clone())
            })
        }

        fn delete(&self, id: i64) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move {
                let mut records = self.records.lock().unwrap();
                let before = records.len();
                records.retain(|r| r.id != id);
                if records.len() == before {
                    return Err(boxed(format!("appointment {} not found", id)));
                }
                Ok(())
            })
        }

        fn list(&self) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
            Box::pin(async move {
                let mut records = self.records.lock().unwrap().clone();
                records.sort_by_key(|r| std::cmp::Reverse(r.appointment_datetime));
                Ok(records)
            })
        }
    }

    /// Recording document storage with per-path failure injection.
    pub struct MockDocumentStorage {
        uploads: Mutex<Vec<(String, usize, String)>>,
        fail_paths: Mutex<Vec<String>>,
    }

    impl Default for MockDocumentStorage {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockDocumentStorage {
        pub fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail_paths: Mutex::new(Vec::new()),
            }
        }

        /// Any upload whose path contains `fragment` will fail.
        pub fn fail_paths_containing(&self, fragment: impl Into<String>) {
            self.fail_paths.lock().unwrap().push(fragment.into());
        }

        /// Paths uploaded so far, in completion order.
        pub fn uploaded_paths(&self) -> Vec<String> {
            self.uploads
                .lock()
                .unwrap()
                .iter()
                .map(|(path, _, _)| path.clone())
                .collect()
        }
    }

    impl DocumentStorage for MockDocumentStorage {
        type Error = BoxedError;

        fn upload(
            &self,
            path: &str,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> BoxFuture<'_, String, Self::Error> {
            let path = path.to_string();
            let content_type = content_type.to_string();
            Box::pin(async move {
                let failing = self
                    .fail_paths
                    .lock()
                    .unwrap()
                    .iter()
                    .any(|fragment| path.contains(fragment));
                if failing {
                    return Err(boxed(format!("upload of {} failed", path)));
                }
                self.uploads
                    .lock()
                    .unwrap()
                    .push((path.clone(), bytes.len(), content_type));
                Ok(self.public_url(&path))
            })
        }

        fn public_url(&self, path: &str) -> String {
            format!("mock://storage/{}", path)
        }
    }

    /// Recording export notifier with optional failure.
    pub struct MockExportNotifier {
        rows: Mutex<Vec<ExportRow>>,
        fail: AtomicBool,
    }

    impl Default for MockExportNotifier {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockExportNotifier {
        pub fn new() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            }
        }

        /// Make every subsequent notify fail.
        pub fn fail_notifications(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        /// Rows shipped so far.
        pub fn rows(&self) -> Vec<ExportRow> {
            self.rows.lock().unwrap().clone()
        }
    }

    impl ExportNotifier for MockExportNotifier {
        type Error = BoxedError;

        fn notify(&self, row: ExportRow) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move {
                if self.fail.load(Ordering::SeqCst) {
                    return Err(boxed("export endpoint unreachable"));
                }
                self.rows.lock().unwrap().push(row);
                Ok(())
            })
        }
    }

    /// Auth gateway accepting a single fixed credential pair.
    pub struct MockAuthGateway {
        email: String,
        password: String,
    }

    impl MockAuthGateway {
        pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
            Self {
                email: email.into(),
                password: password.into(),
            }
        }
    }

    impl AuthGateway for MockAuthGateway {
        type Error = BoxedError;

        fn login(&self, email: &str, password: &str) -> BoxFuture<'_, AuthSession, Self::Error> {
            let ok = email == self.email && password == self.password;
            Box::pin(async move {
                if !ok {
                    return Err(boxed("invalid login credentials"));
                }
                Ok(AuthSession {
                    access_token: "mock-access-token".to_string(),
                    token_type: "bearer".to_string(),
                    expires_in: 3600,
                    refresh_token: None,
                })
            })
        }

        fn logout(&self, _access_token: &str) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async move { Ok(()) })
        }
    }
}
