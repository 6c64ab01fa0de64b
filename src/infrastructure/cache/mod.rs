pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::{ClientProfile, DashboardOverview};
use async_trait::async_trait;

/// Read-through cache for the expensive aggregate views.
///
/// Entries live for at most their TTL and every ledger mutation drops all of
/// them, so a read that follows a write never sees stale figures.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_dashboard(&self, key: &str) -> Result<Option<DashboardOverview>, LedgerError>;
    async fn save_dashboard(
        &self,
        key: &str,
        overview: &DashboardOverview,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn get_client_profile(&self, key: &str) -> Result<Option<ClientProfile>, LedgerError>;
    async fn save_client_profile(
        &self,
        key: &str,
        profile: &ClientProfile,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate_all(&self) -> Result<(), LedgerError>;
}
