use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ProviderError;

/// An account or team services can be created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Parameters for a blueprint service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub owner_id: String,
    pub name: String,
    pub repo_url: String,
    pub branch: Option<String>,
    pub auto_deploy: bool,
}

/// Service returned by the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedService {
    pub id: String,
    pub name: String,
}

/// Port for the hosting provider (Render).
#[async_trait]
pub trait HostingProvider: Send + Sync {
    async fn list_owners(&self) -> Result<Vec<Owner>, ProviderError>;

    async fn create_blueprint_service(
        &self,
        request: &ServiceRequest,
    ) -> Result<CreatedService, ProviderError>;

    /// Dashboard link for a service id.
    fn dashboard_url(&self, service_id: &str) -> String;
}
