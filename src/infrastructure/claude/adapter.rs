//! Adapter implementing the `DeploymentModel` port on top of the HTTP client
//!
//! Structured output is obtained with a single forced tool whose input schema
//! mirrors [`ModelAnalysis`]. The tool input is decoded with serde; anything
//! that does not decode is a schema failure carrying the raw payload.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::domain::errors::ModelError;
use crate::domain::models::{AssembledPrompt, ModelAnalysis, ModelConfig};
use crate::domain::ports::DeploymentModel;
use crate::infrastructure::claude::client::{ClaudeClient, ClaudeClientConfig};
use crate::infrastructure::claude::errors::ClaudeApiError;
use crate::infrastructure::claude::types::{MessageRequest, MessageResponse, StopReason, Tool};

/// Name of the tool the model must answer through
pub const PLAN_TOOL_NAME: &str = "submit_deployment_plan";

const DIAGNOSIS_MAX_TOKENS: u32 = 1024;

/// JSON schema for the plan tool input.
pub fn plan_tool() -> Tool {
    Tool {
        name: PLAN_TOOL_NAME.to_string(),
        description: "Submit the deployment plan and the complete content of every file \
                      that must change for the project to deploy on Render."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "projectType": {
                    "type": "string",
                    "description": "Short classification, e.g. \"Node.js (Express)\""
                },
                "renderYaml": {
                    "type": "string",
                    "description": "Complete render.yaml blueprint for the corrected project"
                },
                "buildCommand": { "type": "string" },
                "startCommand": {
                    "type": "string",
                    "description": "Empty when the project has no start command"
                },
                "explanation": { "type": "string" },
                "fixedFiles": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "fileName": { "type": "string" },
                            "fileContent": { "type": "string" }
                        },
                        "required": ["fileName", "fileContent"]
                    }
                }
            },
            "required": [
                "projectType",
                "renderYaml",
                "buildCommand",
                "startCommand",
                "explanation",
                "fixedFiles"
            ]
        }),
    }
}

fn diagnosis_prompt(raw_error: &str, repo_name: &str) -> String {
    format!(
        "Creating the GitHub repository \"{repo_name}\" failed with this error:\n\n\
         {raw_error}\n\n\
         In two or three sentences, explain to a non-expert what went wrong and \
         what they should do next. Reply with plain text only."
    )
}

impl From<ClaudeApiError> for ModelError {
    fn from(err: ClaudeApiError) -> Self {
        match err {
            ClaudeApiError::MalformedResponse(reason) => Self::Schema {
                reason,
                raw: String::new(),
            },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Anthropic-backed [`DeploymentModel`]
pub struct ClaudeDeploymentModel {
    client: ClaudeClient,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
}

impl ClaudeDeploymentModel {
    /// Build the adapter from model settings and an injected API key.
    pub fn new(config: &ModelConfig, api_key: &str) -> Result<Self, ClaudeApiError> {
        let client = ClaudeClient::new(ClaudeClientConfig::from_model_config(config, api_key))?;

        Ok(Self {
            client,
            model: config.name.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn analysis_request(&self, prompt: &AssembledPrompt) -> MessageRequest {
        let mut request =
            MessageRequest::simple_message(self.model.clone(), prompt.user_message(), self.max_tokens)
                .with_forced_tool(plan_tool());
        request.temperature = self.temperature;
        request
    }

    /// Decode the forced tool call from a response.
    pub fn parse_analysis(response: &MessageResponse) -> Result<ModelAnalysis, ModelError> {
        let Some(input) = response.tool_input(PLAN_TOOL_NAME) else {
            let reason = if response.stop_reason == Some(StopReason::MaxTokens) {
                "response was cut off at max_tokens before the plan was submitted".to_string()
            } else {
                format!("response contained no {PLAN_TOOL_NAME} call")
            };
            return Err(ModelError::Schema {
                reason,
                raw: response.text(),
            });
        };

        serde_json::from_value::<ModelAnalysis>(input.clone()).map_err(|e| ModelError::Schema {
            reason: e.to_string(),
            raw: input.to_string(),
        })
    }
}

#[async_trait]
impl DeploymentModel for ClaudeDeploymentModel {
    #[instrument(skip(self, prompt), fields(model = %self.model, files = prompt.files.len()))]
    async fn analyze(&self, prompt: &AssembledPrompt) -> Result<ModelAnalysis, ModelError> {
        let request = self.analysis_request(prompt);
        let response = self.client.send_message(&request).await?;

        let analysis = Self::parse_analysis(&response);
        match &analysis {
            Ok(a) => debug!(fixes = a.fixed_files.len(), "plan decoded"),
            Err(err) => warn!(error = %err, "plan did not match schema"),
        }
        analysis
    }

    #[instrument(skip(self, raw_error), fields(model = %self.model))]
    async fn diagnose(&self, raw_error: &str, repo_name: &str) -> Result<String, ModelError> {
        let mut request = MessageRequest::simple_message(
            self.model.clone(),
            diagnosis_prompt(raw_error, repo_name),
            DIAGNOSIS_MAX_TOKENS,
        );
        request.temperature = self.temperature;

        let response = self.client.send_message(&request).await?;
        Ok(response.text())
    }
}
