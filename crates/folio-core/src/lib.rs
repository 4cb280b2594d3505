//! Core domain for the Folio portfolio manager.
//!
//! This crate holds the domain models (projects, skills, identities), the
//! session state machine, the route guards, the configuration, and the
//! abstract gateway traits. It knows nothing about HTTP or any concrete
//! backend; infrastructure crates implement the traits defined here.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod project;
pub mod route;
pub mod skill;

// Re-export common types
pub use auth::{AuthEvent, AuthProvider, AuthState, Identity};
pub use config::FolioConfig;
pub use error::{FolioError, Result};
pub use gateway::{ObjectStorage, PortfolioGateway};
pub use guard::RouteDecision;
pub use route::Route;
