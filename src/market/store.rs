//! Single-file market book
//!
//! All markets live in one JSON array, newest first.

use super::{Market, MarketError};
use std::path::{Path, PathBuf};

/// JSON file holding every launched market
pub struct MarketStore {
    path: PathBuf,
}

impl MarketStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored market; a missing or unreadable book is empty
    pub fn load(&self) -> Vec<Market> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read market book");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(markets) => markets,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Corrupt market book, starting empty");
                Vec::new()
            }
        }
    }

    /// Add `market` at the front of the book
    pub fn save(&self, market: Market) -> Result<(), MarketError> {
        let mut markets = self.load();
        let id = market.id.clone();
        markets.insert(0, market);
        self.write(&markets)?;

        tracing::info!(id = %id, total = markets.len(), "Market saved");
        Ok(())
    }

    /// Look up a market by id
    pub fn get(&self, id: &str) -> Result<Market, MarketError> {
        self.load()
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| MarketError::NotFound(id.to_string()))
    }

    fn write(&self, markets: &[Market]) -> Result<(), MarketError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // Write beside the book then rename so readers never see a partial file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(markets)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
