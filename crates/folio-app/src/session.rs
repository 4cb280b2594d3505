//! Session store.
//!
//! Process-wide holder of the current authenticated identity. The store
//! subscribes to the provider's event stream *before* issuing the initial
//! session query, so a sign-in landing between the query and the listener
//! attachment sits in the channel buffer instead of being lost.
//!
//! The listener task is the single writer of the state; `sign_in`,
//! `sign_up` and `sign_out` only delegate to the provider, whose emitted
//! event then flows back through the listener.

use folio_core::auth::{AuthProvider, AuthState, Identity};
use folio_core::error::Result;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Single source of truth for "who is currently authenticated".
///
/// Readers observe the state through a [`watch`] channel; the state is
/// [`AuthState::Unresolved`] only until the initial provider query
/// completes, never indefinitely.
pub struct SessionStore {
    provider: Arc<dyn AuthProvider>,
    state_tx: watch::Sender<AuthState>,
    listener: Option<JoinHandle<()>>,
}

impl SessionStore {
    /// Creates the store and resolves the initial session.
    ///
    /// The event subscription is taken before the provider is queried;
    /// events raised in the window are buffered and applied by the
    /// listener task right after the initial state is published. A failed
    /// initial query resolves to [`AuthState::Anonymous`] rather than
    /// leaving the state unresolved.
    pub async fn initialize(provider: Arc<dyn AuthProvider>) -> Self {
        let (state_tx, _) = watch::channel(AuthState::Unresolved);

        // Attach before querying: closes the query/listener race.
        let events = provider.subscribe();

        let initial = match provider.current_session().await {
            Ok(Some(identity)) => AuthState::Authenticated(identity),
            Ok(None) => AuthState::Anonymous,
            Err(err) => {
                tracing::warn!(error = %err, "initial session query failed, resolving to anonymous");
                AuthState::Anonymous
            }
        };
        state_tx.send_replace(initial);

        let listener = tokio::spawn(listen(events, state_tx.clone()));

        Self {
            provider,
            state_tx,
            listener: Some(listener),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state_tx.borrow().clone()
    }

    /// Subscribes to state changes (route guards, views).
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    /// Current identity, if authenticated.
    pub fn identity(&self) -> Option<Identity> {
        self.state_tx.borrow().identity().cloned()
    }

    /// Delegates to the provider. The store's state is updated by the
    /// provider's change event, not here.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        self.provider.sign_in(email, password).await
    }

    /// Delegates to the provider.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        self.provider.sign_up(email, password).await
    }

    /// Delegates to the provider.
    pub async fn sign_out(&self) -> Result<()> {
        self.provider.sign_out().await
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        // Release the subscription with the store; the callback must not
        // outlive the consuming tree.
        if let Some(listener) = self.listener.take() {
            listener.abort();
        }
    }
}

/// Applies every provider event to the watch channel.
async fn listen(
    mut events: broadcast::Receiver<folio_core::auth::AuthEvent>,
    state_tx: watch::Sender<AuthState>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let next = match event.identity() {
                    Some(identity) => AuthState::Authenticated(identity.clone()),
                    None => AuthState::Anonymous,
                };
                tracing::debug!(signed_in = next.is_signed_in(), "auth state changed");
                state_tx.send_replace(next);
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "auth event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
