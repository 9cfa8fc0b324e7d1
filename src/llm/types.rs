//! Chat-completions wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            tools: None,
            tool_choice: None,
            modalities: None,
        }
    }

    pub fn message(mut self, message: WireMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Offer a single function and force the model to call it
    pub fn forced_tool(mut self, name: &str, description: &str, parameters: Value) -> Self {
        self.tools = Some(vec![WireTool {
            tool_type: "function".to_string(),
            function: WireFunction {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }]);
        self.tool_choice = Some(ToolChoice {
            choice_type: "function".to_string(),
            function: ToolChoiceFunction {
                name: name.to_string(),
            },
        });
        self
    }

    pub fn image_output(mut self) -> Self {
        self.modalities = Some(vec!["image".to_string(), "text".to_string()]);
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: WireFunction,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireFunction {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToolChoice {
    #[serde(rename = "type")]
    pub choice_type: String,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToolChoiceFunction {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default)]
    pub images: Option<Vec<ImagePart>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagePart {
    pub image_url: ImageUrl,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageUrl {
    pub url: String,
}

impl ChatResponse {
    /// First message's call to `name`, if any
    pub fn tool_call(&self, name: &str) -> Option<&FunctionCall> {
        self.choices
            .first()?
            .message
            .tool_calls
            .as_ref()?
            .iter()
            .map(|call| &call.function)
            .find(|function| function.name == name)
    }

    /// First image URL of the first message, if any
    pub fn first_image(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .images
            .as_ref()?
            .first()
            .map(|image| image.image_url.url.as_str())
            .filter(|url| !url.is_empty())
    }
}
