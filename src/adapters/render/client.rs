//! Render HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, instrument};

use super::models::{RenderCreateServiceRequest, RenderCreateServiceResponse, RenderOwnerItem};
use crate::domain::errors::ProviderError;
use crate::domain::models::RenderConfig;
use crate::domain::ports::{CreatedService, HostingProvider, Owner, ServiceRequest};

const PROVIDER: &str = "Render";

/// Errors returned by [`RenderClient`]
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render {operation} returned HTTP {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Render {operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Render {operation} response could not be parsed: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
}

impl From<RenderError> for ProviderError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Api { status, body, .. } => Self::Api {
                provider: PROVIDER,
                status,
                body,
            },
            transport @ RenderError::Transport { .. } => Self::Transport {
                provider: PROVIDER,
                message: transport.to_string(),
            },
            decode @ RenderError::Decode { .. } => Self::Decode {
                provider: PROVIDER,
                message: decode.to_string(),
            },
        }
    }
}

/// HTTP client for the Render REST API v1.
#[derive(Clone)]
pub struct RenderClient {
    http: Client,
    api_url: String,
    dashboard_url: String,
    api_key: String,
}

impl std::fmt::Debug for RenderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderClient")
            .field("api_url", &self.api_url)
            .field("dashboard_url", &self.dashboard_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl RenderClient {
    /// Create a client with an explicitly supplied API key.
    pub fn new(config: &RenderConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            dashboard_url: config.dashboard_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.api_url))
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    async fn send<T: DeserializeOwned>(
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, RenderError> {
        let resp = request
            .send()
            .await
            .map_err(|source| RenderError::Transport { operation, source })?;
        Self::decode(operation, resp).await
    }

    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        resp: Response,
    ) -> Result<T, RenderError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<T>().await.map_err(|e| RenderError::Decode {
            operation,
            message: e.to_string(),
        })
    }

    /// Owners (users and teams) visible to the API key.
    #[instrument(skip(self))]
    pub async fn owners(&self) -> Result<Vec<Owner>, RenderError> {
        let items: Vec<RenderOwnerItem> = Self::send(
            "list_owners",
            self.request(Method::GET, "/v1/owners").query(&[("limit", "100")]),
        )
        .await?;
        info!(count = items.len(), "owners listed");
        Ok(items.into_iter().map(|item| item.owner).collect())
    }

    /// Create a blueprint-backed service from a repository URL.
    #[instrument(skip(self, request), fields(owner = %request.owner_id, repo = %request.repo_url))]
    pub async fn create_service(
        &self,
        request: &ServiceRequest,
    ) -> Result<CreatedService, RenderError> {
        let body = RenderCreateServiceRequest {
            kind: "blueprint",
            name: request.name.clone(),
            owner_id: request.owner_id.clone(),
            repo: request.repo_url.clone(),
            branch: request.branch.clone(),
            auto_deploy: if request.auto_deploy { "yes" } else { "no" },
        };

        let response: RenderCreateServiceResponse = Self::send(
            "create_service",
            self.request(Method::POST, "/v1/services").json(&body),
        )
        .await?;
        let service = response.into_service();
        info!(service_id = %service.id, "service created");
        Ok(service)
    }
}

#[async_trait]
impl HostingProvider for RenderClient {
    async fn list_owners(&self) -> Result<Vec<Owner>, ProviderError> {
        Ok(self.owners().await?)
    }

    async fn create_blueprint_service(
        &self,
        request: &ServiceRequest,
    ) -> Result<CreatedService, ProviderError> {
        Ok(self.create_service(request).await?)
    }

    fn dashboard_url(&self, service_id: &str) -> String {
        format!("{}/web/{service_id}", self.dashboard_url)
    }
}
