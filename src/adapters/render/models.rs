//! Render REST API request and response models.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreatedService, Owner};

/// One element of the `GET /v1/owners` list.
///
/// The list is cursor-paginated; every item wraps the owner.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOwnerItem {
    pub owner: Owner,
}

/// Body for `POST /v1/services`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderCreateServiceRequest {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub owner_id: String,
    pub repo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// `"yes"` or `"no"`
    pub auto_deploy: &'static str,
}

/// `POST /v1/services` response.
///
/// Newer API versions wrap the service next to the initial deploy id;
/// older ones return the service object directly.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RenderCreateServiceResponse {
    Wrapped { service: CreatedService },
    Bare(CreatedService),
}

impl RenderCreateServiceResponse {
    pub fn into_service(self) -> CreatedService {
        match self {
            Self::Wrapped { service } | Self::Bare(service) => service,
        }
    }
}
