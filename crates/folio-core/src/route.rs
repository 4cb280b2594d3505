//! Application route table.

use serde::{Deserialize, Serialize};

/// The views the application exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Public landing page; redirects authenticated users to the dashboard.
    Home,
    About,
    Skills,
    Projects,
    Login,
    /// Management view; requires an authenticated identity.
    Dashboard,
    /// Fallback for unmatched paths.
    NotFound,
}

impl Route {
    /// Maps a path to a route. Unmatched paths resolve to `NotFound`.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/about" => Self::About,
            "/skills" => Self::Skills,
            "/projects" => Self::Projects,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Skills => "/skills",
            Self::Projects => "/projects",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for route in [
            Route::Home,
            Route::About,
            Route::Skills,
            Route::Projects,
            Route::Login,
            Route::Dashboard,
        ] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_root_variants() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
    }

    #[test]
    fn test_unmatched_path_is_not_found() {
        assert_eq!(Route::from_path("/admin"), Route::NotFound);
        assert_eq!(Route::from_path("/dashboard/settings"), Route::NotFound);
    }

    #[test]
    fn test_trailing_slash_normalized() {
        assert_eq!(Route::from_path("/about/"), Route::About);
    }
}
