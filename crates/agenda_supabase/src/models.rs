// --- File: crates/agenda_supabase/src/models.rs ---
//! Wire-level types for the Supabase APIs.
//!
//! The appointment row itself is the shared `AppointmentRecord` from
//! agenda_common; this module only holds the GoTrue token response and the
//! error body shapes the endpoints return.

use serde::Deserialize;

/// Successful password-grant response from GoTrue.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

/// Error body GoTrue returns on failed logins. Field names vary across
/// versions, so every candidate is optional.
#[derive(Debug, Default, Deserialize)]
pub struct AuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub msg: Option<String>,
}

impl AuthErrorBody {
    /// Best human-readable message available.
    pub fn message(&self) -> String {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "invalid login credentials".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_deserializes_gotrue_payload() {
        let json = r#"{
            "access_token": "ey...",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "v1...",
            "user": { "id": "0000" }
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 3600);
        assert!(token.refresh_token.is_some());
    }

    #[test]
    fn auth_error_body_picks_the_best_message() {
        let body: AuthErrorBody =
            serde_json::from_str(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .unwrap();
        assert_eq!(body.message(), "Invalid login credentials");
        assert_eq!(AuthErrorBody::default().message(), "invalid login credentials");
    }
}
