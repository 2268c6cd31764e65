//! Supabase REST client module
//!
//! This module provides a thin client over the three Supabase surfaces the
//! application touches: PostgREST (`/rest/v1`), Storage (`/storage/v1`) and
//! GoTrue (`/auth/v1`). It owns the project URL, the anon key and the
//! request plumbing (headers, status checking); the higher-level repository,
//! storage and auth modules build on it.

use agenda_common::HttpStatusCode;
use agenda_config::SupabaseConfig;
use reqwest::{Client, Method, RequestBuilder, Response};
use thiserror::Error;

/// Errors that can occur when talking to Supabase
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// Error during HTTP request to a Supabase endpoint
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-success status returned by the Supabase API
    #[error("Supabase API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Login or token failure
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl HttpStatusCode for SupabaseError {
    fn status_code(&self) -> u16 {
        match self {
            SupabaseError::RequestError(_) => 502,
            SupabaseError::ApiError { status, .. } if *status >= 400 => *status,
            SupabaseError::ApiError { .. } => 502,
            SupabaseError::ConfigError(_) => 500,
            SupabaseError::AuthError(_) => 401,
            SupabaseError::ParseError(_) => 502,
        }
    }
}

/// Client for the Supabase project the office uses.
#[derive(Debug)]
pub struct SupabaseClient {
    /// HTTP client for making requests
    client: Client,
    /// Project base URL without trailing slash
    base_url: String,
    /// The anon (publishable) API key
    anon_key: String,
    /// Table holding appointment records
    appointments_table: String,
    /// Bucket holding client documents
    documents_bucket: String,
}

impl SupabaseClient {
    /// Creates a new client from the Supabase section of the config.
    ///
    /// The anon key may come from the config (possibly resolved through the
    /// `secret_from_env` marker) or straight from `SUPABASE_ANON_KEY`.
    pub fn new(config: SupabaseConfig) -> Result<Self, SupabaseError> {
        let anon_key = config
            .anon_key
            .clone()
            .or_else(|| std::env::var("SUPABASE_ANON_KEY").ok())
            .ok_or_else(|| {
                SupabaseError::ConfigError(
                    "Supabase anon key missing (set supabase.anon_key or SUPABASE_ANON_KEY)"
                        .to_string(),
                )
            })?;
        Ok(Self {
            client: Client::new(),
            base_url: config.project_url.trim_end_matches('/').to_string(),
            anon_key,
            appointments_table: config.appointments_table,
            documents_bucket: config.documents_bucket,
        })
    }

    pub fn appointments_table(&self) -> &str {
        &self.appointments_table
    }

    pub fn documents_bucket(&self) -> &str {
        &self.documents_bucket
    }

    /// PostgREST endpoint for a table.
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Storage endpoint for one object.
    pub fn storage_object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    /// Public download URL for one object.
    pub fn storage_public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    /// GoTrue endpoint, `endpoint` may carry a query string.
    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    /// A request carrying the api key and a bearer token. Without an
    /// explicit token the anon key doubles as the bearer, which is how
    /// the unauthenticated booking flow operates under row-level security.
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    /// Map a non-success response into `SupabaseError::ApiError` with the
    /// body text as the message.
    pub(crate) async fn check(response: Response) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(SupabaseError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            project_url: "https://example.supabase.co/".to_string(),
            anon_key: Some("anon-key".to_string()),
            appointments_table: "appointments".to_string(),
            documents_bucket: "documents".to_string(),
        }
    }

    #[test]
    fn urls_are_assembled_without_double_slashes() {
        let client = SupabaseClient::new(config()).unwrap();
        assert_eq!(
            client.rest_url("appointments"),
            "https://example.supabase.co/rest/v1/appointments"
        );
        assert_eq!(
            client.storage_object_url("documents", "Maria/photo_id-1-rg.png"),
            "https://example.supabase.co/storage/v1/object/documents/Maria/photo_id-1-rg.png"
        );
        assert_eq!(
            client.storage_public_url("documents", "Maria/photo_id-1-rg.png"),
            "https://example.supabase.co/storage/v1/object/public/documents/Maria/photo_id-1-rg.png"
        );
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://example.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn missing_anon_key_is_a_config_error() {
        std::env::remove_var("SUPABASE_ANON_KEY");
        let mut config = config();
        config.anon_key = None;
        let err = SupabaseClient::new(config).unwrap_err();
        assert!(matches!(err, SupabaseError::ConfigError(_)));
    }

    #[test]
    fn api_error_status_is_forwarded() {
        let err = SupabaseError::ApiError {
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(SupabaseError::AuthError("bad".to_string()).status_code(), 401);
    }
}
