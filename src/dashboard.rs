use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use log::info;
use tokio::sync::Mutex;

use crate::api::CompletionProvider;
use crate::stats::{self, DashboardStats};

/// Fetches the completion history for a profile and keeps the last
/// successfully computed views. A failed refresh leaves them untouched; no
/// partial update is ever visible.
#[derive(Clone)]
pub struct Dashboard {
    provider: Arc<dyn CompletionProvider>,
    stats: Arc<Mutex<Option<DashboardStats>>>,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            stats: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn refresh(&self, profile_id: &str) -> Result<DashboardStats> {
        let records = self.provider.fetch_completions(profile_id).await?;
        let plan_completions = self.provider.fetch_plan_completions(profile_id).await?;

        let computed = stats::aggregate(&records, &plan_completions, Local::now().date_naive());
        info!(
            "Aggregated {} completions for profile {profile_id}",
            computed.total_completions
        );

        *self.stats.lock().await = Some(computed.clone());
        Ok(computed)
    }

    /// The views from the last successful refresh, if any.
    pub async fn current(&self) -> Option<DashboardStats> {
        self.stats.lock().await.clone()
    }
}
