//! HTTP implementation of [`AnalysisService`] on top of `reqwest`.
//!
//! Endpoints (relative to the configured base URL):
//! - `POST /analyze`
//! - `POST /chat`
//! - `GET  /` (health; resolved against the base URL's parent `/`)

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::client::{AnalysisService, GENERIC_FAILURE_DETAIL, ServiceError};
use super::types::{
    AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest, ErrorBody, ServiceStatus,
};

pub struct HttpServiceClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Service root for the health check: `http://host:8000/api` → `http://host:8000/`.
    fn root_url(&self) -> String {
        let scheme_end = self.base_url.find("://").map(|i| i + 3).unwrap_or(0);
        match self.base_url[scheme_end..].find('/') {
            Some(path_start) => format!("{}/", &self.base_url[..scheme_end + path_start]),
            None => format!("{}/", self.base_url),
        }
    }

    /// Maps a response into `T`, or into `RequestFailed` with the server's
    /// `detail` when the body carries one.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
        let status = response.status();
        debug!("Service response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Service error: {} - {}", status, body);
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.detail)
                .unwrap_or_else(|_| GENERIC_FAILURE_DETAIL.to_string());
            return Err(ServiceError::RequestFailed {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to decode service response: {}", e);
            ServiceError::RequestFailed {
                status: status.as_u16(),
                detail: format!("malformed response: {e}"),
            }
        })
    }
}

#[async_trait]
impl AnalysisService for HttpServiceClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ServiceError> {
        info!(
            "Analyze request: race_event_id={}, target_date={}",
            request.race_event_id, request.target_date
        );
        let response = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::TransportFailed(e.to_string()))?;

        Self::decode(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ServiceError> {
        info!(
            "Chat request: session_id={}, message_len={}",
            request.session_id,
            request.message.len()
        );
        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError::TransportFailed(e.to_string()))?;

        Self::decode(response).await
    }

    async fn health(&self) -> Result<ServiceStatus, ServiceError> {
        let url = self.root_url();
        debug!("Health check: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::TransportFailed(e.to_string()))?;

        Self::decode(response).await
    }
}
