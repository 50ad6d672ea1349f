//! Identity provider client
//!
//! REST client for an Identity-Toolkit-style provider: account creation,
//! password sign-in, password-reset mail and profile lookup. Provider
//! error codes map onto the enumerated [`AuthError`] set so every known
//! failure has its own user-facing message.

use crate::config::IdentityConfig;
use crate::domain::{AuthError, Result, UserId, VitalError};
use reqwest::{Client, ClientBuilder};
use secrecy::{ExposeSecret, Secret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// An authenticated session returned by sign-in and sign-up
pub struct AuthSession {
    /// Provider-assigned user id
    pub user_id: UserId,
    /// Account email
    pub email: String,
    /// Display name, when the account has one
    pub display_name: Option<String>,
    /// Bearer token for profile calls; zeroed on drop
    pub id_token: SecretString,
}

/// A user profile from the lookup endpoint
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// Provider-assigned user id
    pub user_id: UserId,
    /// Account email
    pub email: String,
    /// Display name, when set
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    local_id: String,
    email: String,
    id_token: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// REST client for the identity provider
pub struct IdentityClient {
    client: Client,
    config: IdentityConfig,
}

impl IdentityClient {
    /// Create a new identity client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| VitalError::Auth(AuthError::Network(e.to_string())))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/accounts:{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            operation,
            self.config.api_key.expose_secret()
        )
    }

    async fn post(&self, operation: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint(operation))
            .json(&body)
            .send()
            .await
            .map_err(|e| VitalError::Auth(AuthError::Network(e.to_string())))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(VitalError::Auth(map_provider_error(status, &body)))
    }

    /// Create a new account
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::EmailAlreadyRegistered`],
    /// [`AuthError::InvalidEmail`] or [`AuthError::WeakPassword`] for the
    /// matching provider codes.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<AuthSession> {
        tracing::info!(email = %email, "Creating account");

        let response = self
            .post(
                "signUp",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "displayName": display_name,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| VitalError::Auth(AuthError::Network(e.to_string())))?;
        session_from_response(session)
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        tracing::info!(email = %email, "Signing in");

        let response = self
            .post(
                "signInWithPassword",
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| VitalError::Auth(AuthError::Network(e.to_string())))?;
        session_from_response(session)
    }

    /// Sign out of a session
    ///
    /// Sessions are bearer tokens; signing out is a local discard. The
    /// token memory is zeroed when the session drops.
    pub fn sign_out(&self, session: AuthSession) {
        tracing::info!(user_id = %session.user_id, "Signing out");
        drop(session);
    }

    /// Send a password-reset email
    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        tracing::info!(email = %email, "Sending password reset");

        self.post(
            "sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .await?;

        Ok(())
    }

    /// Fetch the profile behind a session token
    pub async fn get_profile(&self, session: &AuthSession) -> Result<UserProfile> {
        let response = self
            .post(
                "lookup",
                serde_json::json!({ "idToken": session.id_token.expose_secret() }),
            )
            .await?;

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| VitalError::Auth(AuthError::Network(e.to_string())))?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or(VitalError::Auth(AuthError::UserNotFound))?;

        Ok(UserProfile {
            user_id: UserId::new(user.local_id).map_err(VitalError::Validation)?,
            email: user.email.unwrap_or_default(),
            display_name: user.display_name,
        })
    }
}

fn session_from_response(response: SessionResponse) -> Result<AuthSession> {
    Ok(AuthSession {
        user_id: UserId::new(response.local_id).map_err(VitalError::Validation)?,
        email: response.email,
        display_name: response.display_name,
        id_token: Secret::new(response.id_token),
    })
}

/// Maps a provider error payload to the enumerated error set
///
/// The payload shape is `{"error": {"message": "EMAIL_EXISTS"}}`; bodies
/// that don't parse fall back to the status code as the provider code.
fn map_provider_error(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            AuthError::from_provider_code(&parsed.error.message, parsed.error.message.clone())
        }
        _ => AuthError::Provider {
            code: status.to_string(),
            message: body.chars().take(200).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_known_provider_code() {
        let body = r#"{"error": {"message": "EMAIL_EXISTS", "code": 400}}"#;
        assert!(matches!(
            map_provider_error(400, body),
            AuthError::EmailAlreadyRegistered
        ));
    }

    #[test]
    fn test_map_code_with_detail() {
        let body =
            r#"{"error": {"message": "WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        assert!(matches!(map_provider_error(400, body), AuthError::WeakPassword));
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        let err = map_provider_error(502, "<html>bad gateway</html>");
        match err {
            AuthError::Provider { code, .. } => assert_eq!(code, "502"),
            other => panic!("expected Provider fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_embeds_operation_and_key() {
        let config: IdentityConfig = toml::from_str("api_key = \"k-123\"").unwrap();
        let client = IdentityClient::new(config).unwrap();
        let url = client.endpoint("signUp");
        assert!(url.ends_with("/accounts:signUp?key=k-123"));
    }
}
