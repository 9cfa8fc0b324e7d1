//! HTTP page fetcher feeding the meta tag scanner

use super::{html::parse_metadata, FetchError, PageMetadata};
use crate::config::FetchConfig;
use crate::telemetry::{record_latency, LatencyMetric};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// Fetches pages and extracts their preview metadata
pub struct MetadataExtractor {
    config: FetchConfig,
    client: Client,
}

impl MetadataExtractor {
    /// Create an extractor with default fetch settings
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    /// Create an extractor with custom fetch settings
    pub fn with_config(config: FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch `url` and extract its title, description and preview image
    ///
    /// Fails only when the page itself cannot be retrieved; pages without
    /// any recognized tags produce empty metadata.
    pub async fn extract(&self, url: &str) -> Result<PageMetadata, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let started = Instant::now();
        let (markup, final_url) = self.fetch(parsed).await?;
        record_latency(LatencyMetric::PageFetch, started.elapsed());

        let metadata = parse_metadata(&markup, Some(&final_url));

        tracing::debug!(
            url = %url,
            has_title = !metadata.title.is_empty(),
            has_description = !metadata.description.is_empty(),
            has_image = metadata.image.is_some(),
            "Extracted page metadata"
        );

        Ok(metadata)
    }

    /// GET the page, returning its (truncated) body and the post-redirect URL
    async fn fetch(&self, url: Url) -> Result<(String, Url), FetchError> {
        let page = url.to_string();

        tracing::debug!(url = %page, "Fetching page");

        let mut response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.classify(&page, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: page,
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let max = self.config.max_body_bytes;
        let mut body: Vec<u8> = Vec::new();

        // Stop reading once the cap is reached; the rest of the page is never downloaded
        while body.len() < max {
            match response
                .chunk()
                .await
                .map_err(|e| self.classify(&page, e))?
            {
                Some(chunk) => body.extend_from_slice(&chunk),
                None => break,
            }
        }

        if body.len() >= max {
            tracing::debug!(url = %page, max_bytes = max, "Page body truncated");
            body.truncate(max);
        }

        Ok((String::from_utf8_lossy(&body).into_owned(), final_url))
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                secs: self.config.timeout_secs,
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
