//! Supabase-compatible infrastructure for Folio.
//!
//! [`SupabaseClient`] implements the core traits against a hosted
//! backend: `AuthProvider` via GoTrue, `PortfolioGateway` via PostgREST,
//! and `ObjectStorage` via the storage API.

mod auth;
mod client;
mod rest;
mod storage;

pub use client::SupabaseClient;
