//! Adapters for the hosted backend (REST tables, object storage, auth).
//!
//! All adapters share one [`SupabaseClient`], which carries the base URL,
//! API keys and request timeout.

mod auth;
mod client;
mod dto;
mod repositories;
mod rest;
mod storage;

pub use auth::SupabaseIdentityProvider;
pub use client::{HttpFailure, SupabaseClient, SupabaseConfig};
pub use repositories::SupabaseRecordStore;
pub use storage::SupabaseLogoStorage;
