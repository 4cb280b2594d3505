//! Authentication domain model.
//!
//! Defines the authenticated identity, the session state machine, and the
//! abstract auth provider contract implemented by the infrastructure layer.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// The authenticated user's descriptor: opaque id plus email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

impl Identity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// Resolved/unresolved session state plus the current identity.
///
/// This replaces the loading-flag + nullable-user pair: an unresolved
/// state with a stale identity is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// The initial provider query has not completed yet.
    #[default]
    Unresolved,
    /// The provider answered: nobody is signed in.
    Anonymous,
    /// The provider answered with a signed-in identity.
    Authenticated(Identity),
}

impl AuthState {
    /// Returns the current identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// True once the initial provider query has completed, either way.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// True when an identity is present.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// A state-change signal emitted by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
    TokenRefreshed(Identity),
}

impl AuthEvent {
    /// The identity this event implies, or `None` for a sign-out.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) | Self::TokenRefreshed(identity) => Some(identity),
            Self::SignedOut => None,
        }
    }
}

/// An abstract authentication provider.
///
/// Implementations wrap an external auth service. Sign-in, sign-up and
/// sign-out never mutate application state directly: the broadcast event
/// stream is the single write path into the session store, so a change
/// observed out-of-band (token refresh, sign-out elsewhere) flows through
/// the same channel as one initiated here.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Queries the provider for an existing session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))`: a session exists
    /// - `Ok(None)`: nobody is signed in
    /// - `Err(_)`: the provider could not be reached
    async fn current_session(&self) -> Result<Option<Identity>>;

    /// Subscribes to state-change events.
    ///
    /// The returned receiver buffers events published after the call, so a
    /// subscriber that attaches before querying
    /// [`current_session`](Self::current_session) cannot miss a sign-in
    /// that lands in between.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;

    /// Signs in with email/password credentials.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    /// Registers a new account with email/password credentials.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;

    /// Signs the current session out.
    async fn sign_out(&self) -> Result<()>;
}
