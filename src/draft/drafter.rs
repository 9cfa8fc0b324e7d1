//! Market drafter: forced completion plus best-effort images

use super::prompts::{draft_prompt, hero_image_prompt, icon_prompt, market_tool};
use super::{GenerationError, MarketDraft};
use crate::llm::CompletionProvider;
use crate::metadata::PageMetadata;
use crate::telemetry::{increment, CounterMetric};
use serde::Deserialize;
use std::sync::Arc;

/// Arguments of the `create_prediction_market` call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DraftArguments {
    question: String,
    description: String,
    #[serde(alias = "displayTitle")]
    og_title: String,
    confidence: f64,
}

/// Drafts markets through a [`CompletionProvider`]
pub struct MarketDrafter {
    provider: Arc<dyn CompletionProvider>,
    generate_icon: bool,
}

impl MarketDrafter {
    /// Create a drafter that also requests topic icons
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            generate_icon: true,
        }
    }

    /// Enable or disable the icon request
    pub fn with_icons(mut self, enabled: bool) -> Self {
        self.generate_icon = enabled;
        self
    }

    /// Draft a market from `metadata`, stamping it with `source_url`
    ///
    /// Fails when the completion fails or its arguments are unusable. Image
    /// and icon failures are logged and leave the field empty.
    pub async fn draft(
        &self,
        metadata: &PageMetadata,
        source_url: &str,
    ) -> Result<MarketDraft, GenerationError> {
        let prompt = draft_prompt(metadata, source_url);
        let raw = self.provider.complete(&prompt, &market_tool()).await?;

        let args: DraftArguments = serde_json::from_value(raw)
            .map_err(|e| GenerationError::InvalidArguments(e.to_string()))?;

        let question = required(args.question, "question")?;
        let description = required(args.description, "description")?;
        let display_title = match args.og_title.trim() {
            "" => metadata.title.clone(),
            title => title.to_string(),
        };
        let confidence = clamp_confidence(args.confidence)?;

        tracing::info!(question = %question, confidence, "Drafted market question");

        let hero_image = match &metadata.image {
            Some(image) => Some(image.clone()),
            None => {
                tracing::info!("No preview image found, generating one");
                self.best_effort_image("hero", &hero_image_prompt(&question))
                    .await
            }
        };

        let icon_image = if self.generate_icon {
            self.best_effort_image("icon", &icon_prompt(&question)).await
        } else {
            None
        };

        Ok(MarketDraft {
            question,
            description,
            display_title,
            confidence,
            source_url: source_url.to_string(),
            hero_image,
            icon_image,
        })
    }

    async fn best_effort_image(&self, kind: &'static str, prompt: &str) -> Option<String> {
        match self.provider.generate_image(prompt).await {
            Ok(url) => {
                tracing::debug!(kind, "Generated image");
                Some(url)
            }
            Err(e) => {
                increment(CounterMetric::ImageFallbacks);
                tracing::warn!(kind, error = %e, "Image generation failed, continuing without it");
                None
            }
        }
    }
}

fn required(value: String, field: &'static str) -> Result<String, GenerationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Clamp into 0..=100; non-finite values are rejected
fn clamp_confidence(raw: f64) -> Result<f64, GenerationError> {
    if !raw.is_finite() {
        return Err(GenerationError::InvalidConfidence);
    }
    let clamped = raw.clamp(0.0, 100.0);
    if clamped != raw {
        tracing::warn!(raw, clamped, "Confidence out of range, clamped");
    }
    Ok(clamped)
}
