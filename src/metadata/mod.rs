//! Page metadata extraction
//!
//! Fetches a page and pulls its link-preview metadata from Open Graph,
//! Twitter Card and plain HTML tags, in that order of preference.

mod extractor;
mod html;

pub use extractor::MetadataExtractor;
pub use html::parse_metadata;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Best-effort preview metadata for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page title, empty when none was found
    pub title: String,
    /// Page description, empty when none was found
    pub description: String,
    /// Absolute preview image URL
    pub image: Option<String>,
}

impl PageMetadata {
    /// True when no field carries any information
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.image.is_none()
    }
}

/// Page retrieval errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("Invalid page URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Request did not finish in time
    #[error("Timed out fetching {url} after {secs}s")]
    Timeout { url: String, secs: u64 },
    /// Page answered with a non-2xx status
    #[error("Page {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// Connection or transport failure
    #[error("Failed to fetch {url}: {reason}")]
    Network { url: String, reason: String },
}
