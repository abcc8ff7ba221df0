pub mod adapter;
pub mod client;
pub mod errors;
pub mod types;

pub use adapter::{plan_tool, ClaudeDeploymentModel, PLAN_TOOL_NAME};
pub use client::{ClaudeClient, ClaudeClientConfig};
pub use errors::ClaudeApiError;
pub use types::{
    ContentBlock, Message, MessageRequest, MessageResponse, StopReason, Tool, ToolChoice, Usage,
};
