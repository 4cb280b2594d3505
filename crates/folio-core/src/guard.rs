//! Route guards.
//!
//! Two decision functions gate navigation on the session state. Both are
//! pure functions of [`AuthState`], so a decision only changes when the
//! state itself changes; there is nothing to re-fire on a re-render.

use crate::auth::AuthState;
use crate::route::Route;

/// What a view host should do for a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still unresolved; show a loading indicator.
    Loading,
    /// Navigate to the given route and render nothing further.
    Redirect(Route),
    /// Render the wrapped content.
    Render,
}

/// Guard for the public landing page.
///
/// An authenticated user is sent to the dashboard; an anonymous visitor
/// sees the page.
pub fn admin_redirect(auth: &AuthState) -> RouteDecision {
    match auth {
        AuthState::Unresolved => RouteDecision::Loading,
        AuthState::Authenticated(_) => RouteDecision::Redirect(Route::Dashboard),
        AuthState::Anonymous => RouteDecision::Render,
    }
}

/// Guard for the management view.
///
/// An anonymous visitor is sent back to the public root. The redirect for
/// an authenticated user already on `/` is handled by [`admin_redirect`],
/// not here.
pub fn protected_route(auth: &AuthState) -> RouteDecision {
    match auth {
        AuthState::Unresolved => RouteDecision::Loading,
        AuthState::Anonymous => RouteDecision::Redirect(Route::Home),
        AuthState::Authenticated(_) => RouteDecision::Render,
    }
}

/// Applies the appropriate guard for a route. Public routes always render.
pub fn resolve(route: Route, auth: &AuthState) -> RouteDecision {
    match route {
        Route::Home => admin_redirect(auth),
        Route::Dashboard => protected_route(auth),
        _ => RouteDecision::Render,
    }
}
