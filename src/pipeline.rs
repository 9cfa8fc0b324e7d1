//! Market generation pipeline
//!
//! Validates the submitted URL, checks model credentials, extracts page
//! metadata and drafts the market. Each run is independent; the three
//! network steps run one after another because each feeds the next.

use crate::config::Config;
use crate::draft::{GenerationError, MarketDraft, MarketDrafter};
use crate::llm::{CompletionProvider, GatewayClient};
use crate::metadata::{FetchError, MetadataExtractor};
use crate::telemetry::{increment, CounterMetric};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Failures that abort a generation run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No URL was supplied
    #[error("URL is required")]
    MissingInput,
    /// Supplied URL is not an absolute http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Model credentials are not configured
    #[error("{0}")]
    Configuration(String),
    /// Target page could not be retrieved
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Model call failed or returned an unusable result
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    /// Stable machine-readable classification
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingInput => "missing_input",
            PipelineError::InvalidUrl(_) => "invalid_url",
            PipelineError::Configuration(_) => "configuration",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Generation(_) => "generation",
        }
    }

    /// True when the caller sent a bad request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingInput | PipelineError::InvalidUrl(_)
        )
    }
}

/// End-to-end URL to market draft generator
pub struct MarketGenerator {
    extractor: MetadataExtractor,
    provider: Arc<dyn CompletionProvider>,
    drafter: MarketDrafter,
}

impl MarketGenerator {
    /// Compose a generator from an extractor and a completion provider
    pub fn new(extractor: MetadataExtractor, provider: Arc<dyn CompletionProvider>) -> Self {
        let drafter = MarketDrafter::new(provider.clone());
        Self {
            extractor,
            provider,
            drafter,
        }
    }

    /// Build the production generator from configuration
    pub fn from_config(config: &Config) -> Self {
        let extractor = MetadataExtractor::with_config(config.fetch.clone());
        let provider = Arc::new(GatewayClient::with_config(config.llm.clone()));
        Self::new(extractor, provider).with_icons(config.llm.generate_icon)
    }

    /// Enable or disable the topic icon request
    pub fn with_icons(mut self, enabled: bool) -> Self {
        self.drafter = self.drafter.with_icons(enabled);
        self
    }

    /// Generate a market draft for `url`
    pub async fn generate(&self, url: &str) -> Result<MarketDraft, PipelineError> {
        let result = self.run(url).await;
        match &result {
            Ok(draft) => {
                increment(CounterMetric::DraftsGenerated);
                tracing::info!(
                    url = %draft.source_url,
                    has_hero_image = draft.hero_image.is_some(),
                    has_icon = draft.icon_image.is_some(),
                    "Market draft generated"
                );
            }
            Err(e) => {
                increment(CounterMetric::PipelineFailures);
                tracing::error!(url = %url, kind = e.kind(), error = %e, "Market generation failed");
            }
        }
        result
    }

    async fn run(&self, url: &str) -> Result<MarketDraft, PipelineError> {
        let source_url = validate_url(url)?;

        self.provider
            .check_credentials()
            .map_err(|e| PipelineError::Configuration(e.to_string()))?;

        tracing::info!(url = %source_url, "Generating market for URL");

        let metadata = self.extractor.extract(source_url).await?;
        let draft = self.drafter.draft(&metadata, source_url).await?;
        Ok(draft)
    }
}

/// Trimmed input if it is an absolute http(s) URL
fn validate_url(raw: &str) -> Result<&str, PipelineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::MissingInput);
    }

    let parsed = Url::parse(trimmed).map_err(|e| PipelineError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed),
        other => Err(PipelineError::InvalidUrl(format!(
            "unsupported scheme {}",
            other
        ))),
    }
}
