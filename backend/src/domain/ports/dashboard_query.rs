//! Driving port for the dashboard read model.

use async_trait::async_trait;

use crate::domain::{Alert, DashboardStats, DashboardView, Error, ScopeFilter};

/// Dashboard queries exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Alerts, statistics, upcoming events and the current structure.
    async fn dashboard(&self, scope: &ScopeFilter) -> Result<DashboardView, Error>;

    /// Sorted alert list.
    async fn alerts(&self, scope: &ScopeFilter) -> Result<Vec<Alert>, Error>;

    /// Dashboard counters.
    async fn stats(&self, scope: &ScopeFilter) -> Result<DashboardStats, Error>;
}
