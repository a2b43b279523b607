use std::time::Duration;

use assistant_core::{OperationKind, SelectionRequest};
use assistant_logging::{assistant_debug, assistant_info, assistant_warn};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::ProcessingError;

/// Path of the processing endpoint, appended to the configured base URL.
pub const PROCESS_PATH: &str = "/api/research/process";

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl DispatchSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<reqwest::Url, ProcessingError> {
        let joined = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined).map_err(|err| {
            ProcessingError::transport(format!("invalid service url '{joined}': {err}"))
        })
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ProcessingError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|err| ProcessingError::transport(err.to_string()))
    }
}

/// Sends one selection to the research service and returns its answer verbatim.
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    async fn process(&self, request: &SelectionRequest) -> Result<String, ProcessingError>;
}

#[derive(Serialize)]
struct ProcessBody<'a> {
    content: &'a str,
    operation: OperationKind,
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DispatchSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn process(&self, request: &SelectionRequest) -> Result<String, ProcessingError> {
        let url = self.settings.endpoint(PROCESS_PATH)?;
        let client = self.settings.build_client()?;
        let body = serde_json::to_vec(&ProcessBody {
            content: request.content(),
            operation: request.operation(),
        })
        .map_err(|err| ProcessingError::transport(err.to_string()))?;

        assistant_info!(
            "POST {} operation={} content_chars={}",
            url,
            request.operation(),
            request.content().chars().count()
        );

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, &self.settings))?;

        let text = read_success_text(response, &self.settings).await?;
        assistant_debug!("process response bytes={}", text.len());
        Ok(text)
    }
}

/// Checks the status and returns the whole body as text.
pub(crate) async fn read_success_text(
    response: reqwest::Response,
    settings: &DispatchSettings,
) -> Result<String, ProcessingError> {
    let status = response.status();
    if !status.is_success() {
        assistant_warn!("{} answered HTTP {}", response.url(), status.as_u16());
        return Err(ProcessingError::Api {
            status: status.as_u16(),
        });
    }
    response
        .text()
        .await
        .map_err(|err| map_reqwest_error(err, settings))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error, settings: &DispatchSettings) -> ProcessingError {
    if err.is_timeout() {
        return ProcessingError::transport(format!(
            "request timed out after {}s",
            settings.request_timeout.as_secs_f32()
        ));
    }
    if err.is_connect() {
        return ProcessingError::transport(format!("could not connect to service: {err}"));
    }
    ProcessingError::transport(err.to_string())
}
