use crate::core::constants::APP_LOG_RETENTION;
use crate::core::errors::LedgerError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Action log kept in process memory, oldest entry first.
///
/// Only the most recent `retention` entries survive; a long-running server
/// otherwise grows one record per ledger write forever.
#[derive(Clone)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<VecDeque<AppLog>>>,
    retention: usize,
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogging {
    pub fn new() -> Self {
        Self::with_retention(APP_LOG_RETENTION)
    }

    pub fn with_retention(retention: usize) -> Self {
        InMemoryLogging {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            retention: retention.max(1),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        let serde_json::Value::Object(fields) = details else {
            return Err(LedgerError::LoggingError(format!(
                "details for {} must be a JSON object",
                action
            )));
        };
        let entry = AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details: fields.into_iter().collect(),
            timestamp: chrono::Utc::now(),
        };

        let mut entries = self.entries.write().await;
        while entries.len() >= self.retention {
            entries.pop_front();
        }
        entries.push_back(entry);
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        Ok(self.entries.read().await.iter().cloned().collect())
    }
}
