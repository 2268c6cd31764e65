//! Repository for appointment records
//!
//! CRUD over the appointments table through PostgREST. Inserts and updates
//! ask for `return=representation` so the server-assigned fields come back
//! in the same round trip. Listing orders by appointment time, newest
//! first, which is the order the admin dashboard renders.

use crate::client::{SupabaseClient, SupabaseError};
use agenda_common::services::{AppointmentChanges, AppointmentRecord, NewAppointment};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AppointmentRepository {
    client: Arc<SupabaseClient>,
}

impl AppointmentRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    /// Persist one appointment and return it with id and creation time.
    pub async fn insert(
        &self,
        appointment: &NewAppointment,
        access_token: Option<&str>,
    ) -> Result<AppointmentRecord, SupabaseError> {
        let url = self.client.rest_url(self.client.appointments_table());
        debug!("Inserting appointment at {}", url);
        let response = self
            .client
            .request(Method::POST, &url, access_token)
            .header("Prefer", "return=representation")
            .json(appointment)
            .send()
            .await?;
        let response = SupabaseClient::check(response).await?;
        first_row(response.json::<Vec<AppointmentRecord>>().await?)
    }

    /// All appointments, `order=appointment_datetime.desc`.
    pub async fn list(
        &self,
        access_token: Option<&str>,
    ) -> Result<Vec<AppointmentRecord>, SupabaseError> {
        let url = format!(
            "{}?select=*&order=appointment_datetime.desc",
            self.client.rest_url(self.client.appointments_table())
        );
        let response = self
            .client
            .request(Method::GET, &url, access_token)
            .send()
            .await?;
        let response = SupabaseClient::check(response).await?;
        Ok(response.json::<Vec<AppointmentRecord>>().await?)
    }

    /// Apply a partial update to one appointment.
    pub async fn update(
        &self,
        id: i64,
        changes: &AppointmentChanges,
        access_token: Option<&str>,
    ) -> Result<AppointmentRecord, SupabaseError> {
        let url = format!(
            "{}?id=eq.{}",
            self.client.rest_url(self.client.appointments_table()),
            id
        );
        let response = self
            .client
            .request(Method::PATCH, &url, access_token)
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?;
        let response = SupabaseClient::check(response).await?;
        first_row(response.json::<Vec<AppointmentRecord>>().await?)
    }

    /// Delete one appointment.
    pub async fn delete(&self, id: i64, access_token: Option<&str>) -> Result<(), SupabaseError> {
        let url = format!(
            "{}?id=eq.{}",
            self.client.rest_url(self.client.appointments_table()),
            id
        );
        let response = self
            .client
            .request(Method::DELETE, &url, access_token)
            .send()
            .await?;
        SupabaseClient::check(response).await?;
        Ok(())
    }
}

/// PostgREST returns row sets; representation responses for single-row
/// writes carry exactly one element. An empty set means the filter
/// matched nothing.
fn first_row(rows: Vec<AppointmentRecord>) -> Result<AppointmentRecord, SupabaseError> {
    rows.into_iter().next().ok_or(SupabaseError::ApiError {
        status: 404,
        message: "no row matched the request".to_string(),
    })
}
