//! GoTrue-backed auth provider.
//!
//! Implements [`AuthProvider`] against the `/auth/v1` endpoints. A
//! successful sign-in or sign-up stores the access token on the client
//! and broadcasts the matching [`AuthEvent`]; the event stream is the
//! only path by which the session store learns about changes.

use crate::client::{StoredSession, SupabaseClient, response_error, transport_error};
use async_trait::async_trait;
use folio_core::auth::{AuthEvent, AuthProvider, Identity};
use folio_core::error::{FolioError, Result};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// GoTrue's user object, reduced to the fields the domain cares about.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: Uuid,
    email: Option<String>,
}

impl WireUser {
    fn into_identity(self) -> Identity {
        Identity::new(self.id, self.email.unwrap_or_default())
    }
}

/// Response of the password-grant and signup endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<WireUser>,
}

impl SupabaseClient {
    async fn token_request(&self, path: &str, email: &str, password: &str) -> Result<Identity> {
        let body = serde_json::json!({ "email": email, "password": password });
        let request = self.http.post(self.auth_url(path)).json(&body);
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let err = response_error(response).await;
            // Credential rejections surface on the login form.
            return Err(FolioError::auth(err.surface_message()));
        }

        let token: TokenResponse = response.json().await.map_err(transport_error)?;
        let user = token
            .user
            .ok_or_else(|| FolioError::auth("response carried no user"))?;
        let identity = user.into_identity();

        if let Some(access_token) = token.access_token {
            self.store_session(
                StoredSession {
                    access_token,
                    identity: identity.clone(),
                },
                AuthEvent::SignedIn(identity.clone()),
            )
            .await;
        }
        Ok(identity)
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    /// Validates the held token against `/auth/v1/user`.
    ///
    /// No token means no session (`Ok(None)`); a rejected token is also
    /// `Ok(None)` after clearing the stale slot. Only transport failures
    /// are errors.
    async fn current_session(&self) -> Result<Option<Identity>> {
        if self.session.read().await.is_none() {
            return Ok(None);
        }

        let request = self.http.get(self.auth_url("user"));
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => {
                let user: WireUser = response.json().await.map_err(transport_error)?;
                Ok(Some(user.into_identity()))
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                tracing::debug!("stored token rejected, clearing session");
                self.clear_session().await;
                Ok(None)
            }
            _ => Err(response_error(response).await),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        tracing::debug!(email, "signing in");
        self.token_request("token?grant_type=password", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        tracing::debug!(email, "signing up");
        self.token_request("signup", email, password).await
    }

    async fn sign_out(&self) -> Result<()> {
        let request = self.http.post(self.auth_url("logout"));
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        // The local session is gone either way; a revocation failure on
        // the service side does not keep the user signed in here.
        self.clear_session().await;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "remote sign-out failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_user_into_identity() {
        let user: WireUser =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000","email":"admin@example.com"}"#)
                .unwrap();
        let identity = user.into_identity();
        assert_eq!(identity.email, "admin@example.com");
        assert_eq!(identity.id, Uuid::nil());
    }

    #[test]
    fn test_wire_user_without_email() {
        let user: WireUser =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000"}"#).unwrap();
        assert_eq!(user.into_identity().email, "");
    }

    #[test]
    fn test_token_response_decodes_password_grant() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {"id": "00000000-0000-0000-0000-000000000000", "email": "admin@example.com"}
        }"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token.as_deref(), Some("jwt"));
        assert!(token.user.is_some());
    }

    // Email-confirmation signups return a user but no token.
    #[test]
    fn test_token_response_decodes_confirmation_signup() {
        let body = r#"{"user": {"id": "00000000-0000-0000-0000-000000000000", "email": "new@example.com"}}"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert!(token.access_token.is_none());
        assert!(token.user.is_some());
    }
}
