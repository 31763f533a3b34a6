use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use crate::stats::{CompletionRecord, PlanCompletion};

/// Read side of the backend's completion history. The core never retries;
/// a failed fetch surfaces as one reportable error.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn fetch_completions(&self, profile_id: &str) -> Result<Vec<CompletionRecord>>;
    async fn fetch_plan_completions(&self, profile_id: &str) -> Result<Vec<PlanCompletion>>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T>(&self, path: &str, profile_id: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            // Tenant-selection convenience, not a security boundary
            .header("X-Profile-Id", profile_id)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("{url} returned {status}"));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("invalid response body from {url}"))
    }
}

#[async_trait]
impl CompletionProvider for ApiClient {
    async fn fetch_completions(&self, profile_id: &str) -> Result<Vec<CompletionRecord>> {
        // Route spelling matches the backend, typo included
        self.get_json(
            &format!("/exercice-completion/byProfileId/{profile_id}"),
            profile_id,
        )
        .await
    }

    async fn fetch_plan_completions(&self, profile_id: &str) -> Result<Vec<PlanCompletion>> {
        self.get_json(
            &format!("/training-plan-completion/byProfileId/{profile_id}"),
            profile_id,
        )
        .await
    }
}
