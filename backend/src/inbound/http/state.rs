//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DashboardQuery, LoginService, MinorCaseFiles, RegistrationCommand, StaffDirectory,
    StructureAdmin,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub structures: Arc<dyn StructureAdmin>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub staff: Arc<dyn StaffDirectory>,
    pub minors: Arc<dyn MinorCaseFiles>,
}
