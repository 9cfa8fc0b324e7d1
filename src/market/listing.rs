//! Market listing: sort and search

use super::Market;
use serde::{Deserialize, Serialize};

/// Listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Highest volume first
    #[default]
    Volume,
    /// Newest first
    Recent,
    /// Soonest expiry first
    Ending,
}

/// Sort markets in place; ties keep their stored order
pub fn sort_markets(markets: &mut [Market], sort_by: SortBy) {
    match sort_by {
        SortBy::Volume => markets.sort_by(|a, b| b.volume.cmp(&a.volume)),
        SortBy::Recent => markets.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Ending => markets.sort_by(|a, b| a.expires_at.cmp(&b.expires_at)),
    }
}

/// Keep markets whose question contains `query`, ignoring case
pub fn filter_by_question(markets: Vec<Market>, query: &str) -> Vec<Market> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return markets;
    }
    markets
        .into_iter()
        .filter(|m| m.question.to_lowercase().contains(&needle))
        .collect()
}
