use super::errors::ClaudeApiError;
use super::types::{MessageRequest, MessageResponse};
use crate::domain::models::ModelConfig;
use crate::infrastructure::logging::SecretScrubber;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the Claude HTTP client
///
/// The API key is always supplied by the caller; the client never reads it
/// from the process environment.
#[derive(Clone)]
pub struct ClaudeClientConfig {
    /// Anthropic API key
    pub api_key: String,

    /// Base URL for the Anthropic API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClaudeClientConfig {
    /// Endpoint and timeout from `model`, key from the caller.
    pub fn from_model_config(model: &ModelConfig, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: model.base_url.clone(),
            timeout_secs: model.timeout_secs,
        }
    }
}

impl std::fmt::Debug for ClaudeClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client for the Anthropic Messages API
///
/// One request per call. Failures are classified and returned; nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http_client: ReqwestClient,
    base_url: String,
    scrubber: SecretScrubber,
}

impl ClaudeClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `ClaudeApiError::InvalidRequest` if the key is not a valid
    /// header value, or `NetworkError` if the HTTP client cannot be built.
    pub fn new(config: ClaudeClientConfig) -> Result<Self, ClaudeApiError> {
        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "initializing Claude API client"
        );

        let scrubber = SecretScrubber::new()
            .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid scrub pattern: {e}")))?
            .with_literals([config.api_key.clone()]);

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClaudeApiError::InvalidRequest(format!("Invalid API key: {e}")))?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(ClaudeApiError::NetworkError)?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            scrubber,
        })
    }

    /// Send a message request and return the parsed response
    #[instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens))]
    pub async fn send_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, ClaudeApiError> {
        let url = format!("{}/v1/messages", self.base_url);
        debug!(%url, "sending message request");

        let response = self.http_client.post(&url).json(request).send().await?;
        let result = self.handle_response(response).await;

        match &result {
            Ok(response) => info!(
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "message request succeeded"
            ),
            Err(err) => warn!(error = %err, "message request failed"),
        }

        result
    }

    async fn handle_response(&self, response: Response) -> Result<MessageResponse, ClaudeApiError> {
        let status = response.status();
        debug!(%status, "response received");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(ClaudeApiError::from_status(status, self.scrubber.scrub(&body)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClaudeApiError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClaudeClientConfig {
            api_key: "test-api-key".to_string(),
            base_url: "https://api.test.com/".to_string(),
            timeout_secs: 30,
        };

        let client = ClaudeClient::new(config).unwrap();
        assert_eq!(client.base_url, "https://api.test.com");
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let config = ClaudeClientConfig::from_model_config(&ModelConfig::default(), "bad\nkey");
        let result = ClaudeClient::new(config);
        assert!(matches!(result, Err(ClaudeApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_config_takes_endpoint_from_model_settings() {
        let model = ModelConfig {
            base_url: "http://localhost:9999".to_string(),
            timeout_secs: 5,
            ..ModelConfig::default()
        };

        let config = ClaudeClientConfig::from_model_config(&model, "key");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config =
            ClaudeClientConfig::from_model_config(&ModelConfig::default(), "sk-ant-api03-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("REDACTED"));
    }
}
