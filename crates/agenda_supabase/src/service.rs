//! Supabase implementations of the agenda_common service traits.
//!
//! These adapters are what the service factory hands to the scheduling
//! core: the concrete repository, bucket and auth clients wrapped behind
//! the trait objects the flow consumes. All of them run on the anon key;
//! the token-forwarding admin paths use the repository directly.

use crate::auth::AuthClient;
use crate::client::SupabaseError;
use crate::repository::AppointmentRepository;
use crate::storage::DocumentBucket;
use agenda_common::services::{
    AppointmentChanges, AppointmentRecord, AppointmentStore, AuthGateway, AuthSession, BoxFuture,
    BoxedError, DocumentStorage, NewAppointment,
};

fn boxed(err: SupabaseError) -> BoxedError {
    BoxedError(Box::new(err))
}

/// `AppointmentStore` backed by the PostgREST repository.
pub struct SupabaseAppointmentStore {
    repository: AppointmentRepository,
}

impl SupabaseAppointmentStore {
    pub fn new(repository: AppointmentRepository) -> Self {
        Self { repository }
    }
}

impl AppointmentStore for SupabaseAppointmentStore {
    type Error = BoxedError;

    fn insert(
        &self,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move {
            self.repository
                .insert(&appointment, None)
                .await
                .map_err(boxed)
        })
    }

    fn update(
        &self,
        id: i64,
        changes: AppointmentChanges,
    ) -> BoxFuture<'_, AppointmentRecord, Self::Error> {
        Box::pin(async move { self.repository.update(id, &changes, None).await.map_err(boxed) })
    }

    fn delete(&self, id: i64) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move { self.repository.delete(id, None).await.map_err(boxed) })
    }

    fn list(&self) -> BoxFuture<'_, Vec<AppointmentRecord>, Self::Error> {
        Box::pin(async move { self.repository.list(None).await.map_err(boxed) })
    }
}

/// `DocumentStorage` backed by the Storage bucket.
pub struct SupabaseDocumentStorage {
    bucket: DocumentBucket,
}

impl SupabaseDocumentStorage {
    pub fn new(bucket: DocumentBucket) -> Self {
        Self { bucket }
    }
}

impl DocumentStorage for SupabaseDocumentStorage {
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
            self.bucket
                .upload(&path, bytes, &content_type)
                .await
                .map_err(boxed)
        })
    }

    fn public_url(&self, path: &str) -> String {
        self.bucket.public_url(path)
    }
}

/// `AuthGateway` backed by GoTrue.
pub struct SupabaseAuthGateway {
    auth: AuthClient,
}

impl SupabaseAuthGateway {
    pub fn new(auth: AuthClient) -> Self {
        Self { auth }
    }
}

impl AuthGateway for SupabaseAuthGateway {
    type Error = BoxedError;

    fn login(&self, email: &str, password: &str) -> BoxFuture<'_, AuthSession, Self::Error> {
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move { self.auth.login(&email, &password).await.map_err(boxed) })
    }

    fn logout(&self, access_token: &str) -> BoxFuture<'_, (), Self::Error> {
        let access_token = access_token.to_string();
        Box::pin(async move { self.auth.logout(&access_token).await.map_err(boxed) })
    }
}
