//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: REST, storage and auth adapters for the hosted backend.
//! - **memory**: in-process store used for demo mode and behaviour tests.
//! - **invite_links**: builds registration links locally.
//!
//! Adapters translate between domain types and wire representations and
//! carry no business rules.

pub mod invite_links;
pub mod memory;
pub mod supabase;
