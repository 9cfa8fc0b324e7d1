//! OpenAI-compatible chat-completions gateway client

use super::types::{ChatRequest, ChatResponse, WireMessage};
use super::{CompletionProvider, LlmError, Prompt, ToolSchema};
use crate::config::LlmConfig;
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;

/// Longest error body kept from a failed gateway response
const MAX_ERROR_BODY: usize = 500;

/// Client for a hosted chat-completions gateway
///
/// The API key is resolved on every call, so a missing key surfaces as a
/// per-request configuration error instead of a startup failure.
pub struct GatewayClient {
    config: LlmConfig,
    http: Client,
}

impl GatewayClient {
    /// Create a client with default gateway settings
    pub fn new() -> Self {
        Self::with_config(LlmConfig::default())
    }

    /// Create a client with custom gateway settings
    pub fn with_config(config: LlmConfig) -> Self {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, http }
    }

    /// Explicit key from config, else the configured environment variable
    fn api_key(&self) -> Result<String, LlmError> {
        self.config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.config.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| LlmError::MissingApiKey {
                env: self.config.api_key_env.clone(),
            })
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key()?))
            .map_err(|e| LlmError::Transport(format!("invalid API key header: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        tracing::debug!(model = %request.model, "AI gateway chat request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(floor_char_boundary(&body, MAX_ERROR_BODY));
            tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}

impl Default for GatewayClient {
    fn default() -> Self {
        Self::new()
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

#[async_trait]
impl CompletionProvider for GatewayClient {
    fn check_credentials(&self) -> Result<(), LlmError> {
        self.api_key().map(|_| ())
    }

    async fn complete(&self, prompt: &Prompt, tool: &ToolSchema) -> Result<Value, LlmError> {
        let request = ChatRequest::new(&self.config.completion_model)
            .message(WireMessage::system(&prompt.system))
            .message(WireMessage::user(&prompt.user))
            .forced_tool(&tool.name, &tool.description, tool.parameters.clone());

        let started = Instant::now();
        let response = self.chat(&request).await;
        record_latency(LatencyMetric::Completion, started.elapsed());
        let response = response?;

        let call = response
            .tool_call(&tool.name)
            .ok_or_else(|| LlmError::MissingToolCall(tool.name.clone()))?;

        serde_json::from_str(&call.arguments).map_err(|e| {
            LlmError::MalformedResponse(format!("tool arguments are not JSON: {}", e))
        })
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest::new(&self.config.image_model)
            .message(WireMessage::user(prompt))
            .image_output();

        let started = Instant::now();
        let response = self.chat(&request).await;
        record_latency(LatencyMetric::ImageGeneration, started.elapsed());

        response?
            .first_image()
            .map(str::to_string)
            .ok_or(LlmError::NoImage)
    }
}
