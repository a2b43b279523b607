//! Client for the service's auxiliary endpoints: health, history and usage stats.

use std::collections::BTreeMap;

use assistant_logging::assistant_info;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dispatch::{map_reqwest_error, read_success_text};
use crate::{DispatchSettings, ProcessingError};

const HEALTH_PATH: &str = "/api/research/health";
const HISTORY_PATH: &str = "/api/research/history";
const STATS_PATH: &str = "/api/research/stats";
const CLEAR_HISTORY_PATH: &str = "/api/research/clear-history";

/// Requests per operation name as counted by the service.
pub type UsageStats = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Request(#[from] ProcessingError),
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    settings: DispatchSettings,
}

impl ServiceClient {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub async fn health(&self) -> Result<BTreeMap<String, String>, ServiceError> {
        self.get_json(HEALTH_PATH).await
    }

    /// Recent queries keyed by `<millis>_<operation>`, values truncated by the service.
    pub async fn history(&self) -> Result<BTreeMap<String, String>, ServiceError> {
        self.get_json(HISTORY_PATH).await
    }

    pub async fn usage_stats(&self) -> Result<UsageStats, ServiceError> {
        self.get_json(STATS_PATH).await
    }

    pub async fn clear_history(&self) -> Result<String, ServiceError> {
        let url = self.settings.endpoint(CLEAR_HISTORY_PATH)?;
        let client = self.settings.build_client()?;
        assistant_info!("POST {}", url);
        let response = client
            .post(url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &self.settings))?;
        Ok(read_success_text(response, &self.settings).await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let url = self.settings.endpoint(path)?;
        let client = self.settings.build_client()?;
        assistant_info!("GET {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &self.settings))?;
        let text = read_success_text(response, &self.settings).await?;
        serde_json::from_str(&text).map_err(|err| ServiceError::Decode {
            message: err.to_string(),
        })
    }
}
