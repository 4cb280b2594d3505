//! Supabase client handle.
//!
//! Owns the HTTP client, the connection configuration, the current access
//! token, and the auth event fan-out. The auth, rest and storage modules
//! all operate through this handle.

use folio_core::auth::{AuthEvent, Identity};
use folio_core::config::FolioConfig;
use folio_core::error::FolioError;
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Capacity of the auth event channel. Events are applied promptly by the
/// session store; 16 covers any burst during initialization.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// A signed-in session as held by the client: bearer token plus the
/// identity it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct StoredSession {
    pub access_token: String,
    pub identity: Identity,
}

/// Handle to a Supabase-compatible backend.
///
/// Cheap to clone; all clones share the token slot and the event channel.
#[derive(Clone)]
pub struct SupabaseClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: FolioConfig,
    pub(crate) session: Arc<RwLock<Option<StoredSession>>>,
    pub(crate) events: broadcast::Sender<AuthEvent>,
}

impl SupabaseClient {
    /// Creates a client from connection configuration.
    pub fn new(config: FolioConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            config,
            session: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// URL of a PostgREST table endpoint.
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.service_url)
    }

    /// URL of a GoTrue auth endpoint.
    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.service_url)
    }

    /// URL of a storage object endpoint.
    pub(crate) fn storage_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{bucket}/{path}",
            self.config.service_url
        )
    }

    /// Attaches the `apikey` and `Authorization` headers: the session's
    /// bearer token when signed in, the anon key otherwise.
    pub(crate) async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let session = self.session.read().await;
        let bearer = session
            .as_ref()
            .map(|s| s.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone());
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Stores a session and broadcasts the corresponding event.
    pub(crate) async fn store_session(&self, stored: StoredSession, event: AuthEvent) {
        *self.session.write().await = Some(stored);
        // Nobody listening yet is fine; the store subscribes before its
        // first query.
        let _ = self.events.send(event);
    }

    /// Clears the session and broadcasts a sign-out.
    pub(crate) async fn clear_session(&self) {
        *self.session.write().await = None;
        let _ = self.events.send(AuthEvent::SignedOut);
    }

    /// The identity currently held by this client, without a remote call.
    pub async fn stored_identity(&self) -> Option<Identity> {
        self.session.read().await.as_ref().map(|s| s.identity.clone())
    }
}

/// Maps a transport-level failure onto the uniform gateway error.
pub(crate) fn transport_error(err: reqwest::Error) -> FolioError {
    FolioError::gateway(err.to_string())
}

/// Extracts the service's human-readable message from an error response
/// body. PostgREST uses `message`, GoTrue uses `error_description` or
/// `msg`; fall back to the raw body.
pub(crate) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error_description: Option<String>,
        msg: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed
            .message
            .or(parsed.error_description)
            .or(parsed.msg)
            .filter(|m| !m.is_empty())
        {
            return message;
        }
    }
    if body.trim().is_empty() {
        format!("request failed with status {status}")
    } else {
        body.trim().to_string()
    }
}

/// Converts a non-success response into the appropriate error, consuming
/// the body for its message.
pub(crate) async fn response_error(response: reqwest::Response) -> FolioError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        FolioError::auth(message)
    } else {
        FolioError::gateway(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn client() -> SupabaseClient {
        let config = FolioConfig::from_values(
            Some("https://example.supabase.co".to_string()),
            Some("anon-key".to_string()),
        )
        .unwrap();
        SupabaseClient::new(config)
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client();
        assert_eq!(
            client.rest_url("projects"),
            "https://example.supabase.co/rest/v1/projects"
        );
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://example.supabase.co/auth/v1/token?grant_type=password"
        );
        assert_eq!(
            client.storage_url("project-images", "7/cover.png"),
            "https://example.supabase.co/storage/v1/object/project-images/7/cover.png"
        );
    }

    #[test]
    fn test_error_message_postgrest() {
        let body = r#"{"code":"42501","message":"permission denied","details":null}"#;
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, body),
            "permission denied"
        );
    }

    #[test]
    fn test_error_message_gotrue() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, ""),
            "request failed with status 502 Bad Gateway"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[tokio::test]
    async fn test_session_slot() {
        let client = client();
        assert!(client.stored_identity().await.is_none());

        let identity = Identity::new(uuid::Uuid::nil(), "admin@example.com");
        client
            .store_session(
                StoredSession {
                    access_token: "jwt".to_string(),
                    identity: identity.clone(),
                },
                AuthEvent::SignedIn(identity.clone()),
            )
            .await;
        assert_eq!(client.stored_identity().await, Some(identity));

        client.clear_session().await;
        assert!(client.stored_identity().await.is_none());
    }
}
