//! HTTP client for the admin workflow endpoints.
//!
//! Used by:
//! 1. The `wfadmin` CLI commands and the interactive console
//! 2. Integration tests, against a local stub server
//!
//! Each call is a single best-effort request. No retries, no caching.

use crate::config::Config;
use crate::workflow::api::WorkflowApi;
use crate::workflow::errors::ApiError;
use crate::workflow::types::{StatusUpdate, WorkflowKind, WorkflowList, WorkflowRequest};
use async_trait::async_trait;
use reqwest::{header, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Error body the backend sends with failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed implementation of [`WorkflowApi`].
pub struct HttpWorkflowClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpWorkflowClient {
    /// Create a client for `base_url` (e.g. `https://host:9443/api/am/admin/v4`).
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client from the effective configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            config.server_url.clone(),
            config.token.clone(),
            config.timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL plus `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Turn a non-2xx response into an `ApiError`, keeping the server's description.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let description = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.description.or(b.message)),
        Err(_) => None,
    };

    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized { description }
    } else {
        ApiError::Status {
            status: status.as_u16(),
            description,
        }
    }
}

#[async_trait]
impl WorkflowApi for HttpWorkflowClient {
    async fn list_workflows(&self, kind: &WorkflowKind) -> Result<Vec<WorkflowRequest>, ApiError> {
        let url = self.endpoint(&["workflows"])?;
        tracing::debug!("GET {} type={}", url, kind);

        let response = self
            .authorize(self.http.get(url))
            .query(&[("type", kind.wire_name())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        let list: WorkflowList =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(list.list)
    }

    async fn update_workflow(
        &self,
        reference_id: &str,
        update: &StatusUpdate,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["workflows", reference_id])?;
        tracing::debug!("PUT {} status={}", url, update.status);

        let response = self
            .authorize(self.http.put(url))
            .json(update)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}
