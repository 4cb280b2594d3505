//! Application layer for Folio.
//!
//! Coordinates the core domain with whatever infrastructure implements
//! the gateway traits: the [`SessionStore`] tracks the authenticated
//! identity, the [`Dashboard`] keeps the management view's collections
//! consistent with the backing store.

pub mod dashboard;
pub mod session;

pub use dashboard::{Dashboard, FormState};
pub use session::SessionStore;
