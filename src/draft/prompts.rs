//! Prompts and the market function schema

use crate::llm::{Prompt, ToolSchema};
use crate::metadata::PageMetadata;
use serde_json::json;

/// Name of the function the model must call
pub const CREATE_MARKET_TOOL: &str = "create_prediction_market";

const SYSTEM_PROMPT: &str = "You are an expert at creating prediction markets. \
Given the title and description of a web page, create a compelling binary (YES/NO) \
prediction market question. The market must be:
- Clear and unambiguous
- Resolvable within 7 days
- Interesting and likely to attract bets
- Based strictly on the supplied title and description, not on URLs or other technical metadata";

/// Function schema the model answers through
pub fn market_tool() -> ToolSchema {
    ToolSchema {
        name: CREATE_MARKET_TOOL.to_string(),
        description: "Create a binary prediction market based on analyzed content".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "Clear YES/NO question for the prediction market"
                },
                "description": {
                    "type": "string",
                    "description": "Detailed description of the market, resolution criteria, and context"
                },
                "ogTitle": {
                    "type": "string",
                    "description": "Title extracted from the webpage or generated"
                },
                "confidence": {
                    "type": "number",
                    "description": "Confidence score 0-100 for how good this market is"
                }
            },
            "required": ["question", "description", "ogTitle", "confidence"],
            "additionalProperties": false
        }),
    }
}

/// Drafting prompt grounded in the page's metadata
pub fn draft_prompt(metadata: &PageMetadata, source_url: &str) -> Prompt {
    let title = or_placeholder(&metadata.title);
    let description = or_placeholder(&metadata.description);

    let user = format!(
        "Create a prediction market from this page.

Source: {source_url}
Title: {title}
Description: {description}

Generate a binary prediction market with:
1. A clear YES/NO question
2. A detailed description explaining what the market is about
3. How it will be resolved
4. Any relevant context from the title and description"
    );

    Prompt::new(SYSTEM_PROMPT, user)
}

/// Hero image request for a drafted question
pub fn hero_image_prompt(question: &str) -> String {
    format!(
        "Generate a prediction market hero image for: {question}. Make it professional, \
         engaging, and suitable for a betting/prediction market platform. 16:9 aspect ratio."
    )
}

/// Square topic icon request for a drafted question
pub fn icon_prompt(question: &str) -> String {
    format!(
        "Generate a minimalist square icon representing the topic of this question: {question}. \
         Simple flat shapes, no text, 1:1 aspect ratio."
    )
}

fn or_placeholder(text: &str) -> &str {
    if text.is_empty() {
        "(not available)"
    } else {
        text
    }
}
