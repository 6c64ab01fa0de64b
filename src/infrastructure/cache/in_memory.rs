use crate::core::errors::LedgerError;
use crate::core::models::{ClientProfile, DashboardOverview};
use crate::infrastructure::cache::Cache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Entries<T> = Arc<RwLock<HashMap<String, (T, DateTime<Utc>)>>>;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    dashboards: Entries<DashboardOverview>,
    profiles: Entries<ClientProfile>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            dashboards: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn expiry(ttl: std::time::Duration) -> Result<DateTime<Utc>, LedgerError> {
    Ok(Utc::now()
        + chrono::Duration::from_std(ttl).map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?)
}

async fn fresh<T: Clone>(entries: &Entries<T>, key: &str) -> Option<T> {
    let entries = entries.read().await;
    entries
        .get(key)
        .filter(|(_, expires_at)| *expires_at > Utc::now())
        .map(|(value, _)| value.clone())
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_dashboard(&self, key: &str) -> Result<Option<DashboardOverview>, LedgerError> {
        Ok(fresh(&self.dashboards, key).await)
    }

    async fn save_dashboard(
        &self,
        key: &str,
        overview: &DashboardOverview,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let expires_at = expiry(ttl)?;
        let mut dashboards = self.dashboards.write().await;
        dashboards.insert(key.to_string(), (overview.clone(), expires_at));
        Ok(())
    }

    async fn get_client_profile(&self, key: &str) -> Result<Option<ClientProfile>, LedgerError> {
        Ok(fresh(&self.profiles, key).await)
    }

    async fn save_client_profile(
        &self,
        key: &str,
        profile: &ClientProfile,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let expires_at = expiry(ttl)?;
        let mut profiles = self.profiles.write().await;
        profiles.insert(key.to_string(), (profile.clone(), expires_at));
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), LedgerError> {
        self.dashboards.write().await.clear();
        self.profiles.write().await.clear();
        Ok(())
    }
}
