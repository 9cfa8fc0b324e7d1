//! Language model boundary
//!
//! The drafting pipeline only talks to a [`CompletionProvider`]: one forced
//! structured completion and one image request. [`GatewayClient`] implements
//! it against an OpenAI-compatible chat-completions gateway.

mod gateway;
mod types;

pub use gateway::GatewayClient;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// System and user instructions for one completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Function the model is forced to answer through
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    /// JSON schema of the function arguments
    pub parameters: Value,
}

/// Errors from the completion provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key configured or present in the environment
    #[error("{env} not configured")]
    MissingApiKey { env: String },
    /// Call did not finish in time
    #[error("AI gateway timed out after {secs}s")]
    Timeout { secs: u64 },
    /// Gateway answered with a non-2xx status
    #[error("AI gateway error: {status}")]
    Api { status: u16, body: String },
    /// Connection or transport failure
    #[error("AI gateway request failed: {0}")]
    Transport(String),
    /// Response body did not have the expected shape
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
    /// Model answered without calling the forced function
    #[error("No {0} tool call in AI response")]
    MissingToolCall(String),
    /// Image request returned no image
    #[error("No image generated")]
    NoImage,
}

/// Hosted model capable of forced function calls and image generation
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Verify credentials are available before any work starts
    fn check_credentials(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Run `prompt` and return the arguments the model passed to `tool`
    async fn complete(&self, prompt: &Prompt, tool: &ToolSchema) -> Result<Value, LlmError>;

    /// Generate an image for `prompt`, returning its URL (or data URL)
    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError>;
}
