//! GoTrue password-grant login and logout.
//!
//! Only the admin surface authenticates; the booking flow itself runs
//! unauthenticated on the anon key.

use crate::client::{SupabaseClient, SupabaseError};
use crate::models::{AuthErrorBody, TokenResponse};
use agenda_common::services::AuthSession;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AuthClient {
    client: Arc<SupabaseClient>,
}

impl AuthClient {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    /// Exchange e-mail and password for a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, SupabaseError> {
        let url = self.client.auth_url("token?grant_type=password");
        let response = self
            .client
            .request(Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            return Err(SupabaseError::AuthError(body.message()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| SupabaseError::ParseError(err.to_string()))?;
        info!("Admin login succeeded for {}", email);
        Ok(AuthSession {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            refresh_token: token.refresh_token,
        })
    }

    /// Invalidate a session token.
    pub async fn logout(&self, access_token: &str) -> Result<(), SupabaseError> {
        let url = self.client.auth_url("logout");
        let response = self
            .client
            .request(Method::POST, &url, Some(access_token))
            .send()
            .await?;
        SupabaseClient::check(response).await?;
        Ok(())
    }
}
