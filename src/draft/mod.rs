//! Market drafting
//!
//! Turns page metadata into a binary market draft through a forced
//! function call, then fills in hero image and icon on a best-effort basis.

mod drafter;
mod prompts;

pub use drafter::MarketDrafter;
pub use prompts::{market_tool, CREATE_MARKET_TOOL};

use crate::llm::LlmError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A drafted YES/NO market, ready for the caller to review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDraft {
    /// YES/NO question
    pub question: String,
    /// Context and resolution criteria
    pub description: String,
    /// Short display title
    #[serde(rename = "ogTitle", alias = "displayTitle")]
    pub display_title: String,
    /// Model's self-rated quality score, always within 0..=100
    pub confidence: f64,
    /// The URL the caller submitted
    pub source_url: String,
    #[serde(
        rename = "ogImage",
        alias = "heroImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
}

/// Drafting failures; any of these aborts the pipeline
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Completion call failed or returned no structured result
    #[error(transparent)]
    Completion(#[from] LlmError),
    /// Tool arguments did not match the market schema
    #[error("AI response did not match the market schema: {0}")]
    InvalidArguments(String),
    /// A required field was blank
    #[error("AI response left {0} empty")]
    EmptyField(&'static str),
    /// Confidence was NaN or infinite
    #[error("AI response carried a non-finite confidence")]
    InvalidConfidence,
}
