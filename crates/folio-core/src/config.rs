//! Application configuration.
//!
//! The backing service URL and public API key come from the environment.
//! Both are required; startup fails fast when either is absent.

use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the persistence/auth service URL.
pub const SERVICE_URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the public (anon) API key.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Connection configuration for the remote persistence/auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Base URL of the service, without a trailing slash.
    pub service_url: String,
    /// Public API key sent with every request.
    pub anon_key: String,
}

impl FolioConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `FolioError::Config` if either variable is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(SERVICE_URL_VAR).ok(),
            std::env::var(ANON_KEY_VAR).ok(),
        )
    }

    /// Builds the configuration from already-resolved values.
    ///
    /// Split out from [`from_env`](Self::from_env) so validation can be
    /// tested without mutating the process environment.
    pub fn from_values(service_url: Option<String>, anon_key: Option<String>) -> Result<Self> {
        let service_url = service_url
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| FolioError::config(format!("missing {SERVICE_URL_VAR}")))?;
        let anon_key = anon_key
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| FolioError::config(format!("missing {ANON_KEY_VAR}")))?;

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}
