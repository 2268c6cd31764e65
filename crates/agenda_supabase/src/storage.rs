//! Document storage over the Supabase Storage API.
//!
//! Objects are uploaded into the configured bucket under the
//! `{sanitized-client-name}/{field}-{timestamp}-{filename}` paths the
//! intake module produces, and served back through the public URL route.

use crate::client::{SupabaseClient, SupabaseError};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct DocumentBucket {
    client: Arc<SupabaseClient>,
}

impl DocumentBucket {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    /// Upload one object and return its public URL.
    pub async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SupabaseError> {
        let url = self
            .client
            .storage_object_url(self.client.documents_bucket(), path);
        debug!("Uploading {} bytes to {}", bytes.len(), url);
        let response = self
            .client
            .request(Method::POST, &url, None)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        SupabaseClient::check(response).await?;
        Ok(self.public_url(path))
    }

    /// Public URL an object at `path` is served from.
    pub fn public_url(&self, path: &str) -> String {
        self.client
            .storage_public_url(self.client.documents_bucket(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_config::SupabaseConfig;

    #[test]
    fn public_url_points_into_the_configured_bucket() {
        let client = Arc::new(
            SupabaseClient::new(SupabaseConfig {
                project_url: "https://example.supabase.co".to_string(),
                anon_key: Some("anon".to_string()),
                appointments_table: "appointments".to_string(),
                documents_bucket: "documents".to_string(),
            })
            .unwrap(),
        );
        let bucket = DocumentBucket::new(client);
        assert_eq!(
            bucket.public_url("Maria_Souza/photo_id-1717689600000-rg.png"),
            "https://example.supabase.co/storage/v1/object/public/documents/Maria_Souza/photo_id-1717689600000-rg.png"
        );
    }
}
