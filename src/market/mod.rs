//! Mock market book
//!
//! Launched drafts become market records with placeholder pricing and
//! liquidity. Nothing here moves money: prices never change, bets are only
//! quoted, and resolution is out of scope.

mod betting;
mod listing;
mod store;

pub use betting::{BetQuote, Outcome};
pub use listing::{filter_by_question, sort_markets, SortBy};
pub use store::MarketStore;

use crate::draft::MarketDraft;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder wallet recorded as every market's creator
pub const PLACEHOLDER_CREATOR: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb1";

/// Share of volume accruing to the market creator
pub const CREATOR_FEE_SHARE: Decimal = dec!(0.02);

/// Days until a market expires when no end time is chosen
pub const DEFAULT_DURATION_DAYS: i64 = 7;

/// Lifecycle status of a market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Active,
    Resolved,
    Pending,
}

/// Who decides the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OracleType {
    /// Market creator resolves
    #[default]
    Creator,
    /// AI resolution
    Ai,
}

/// A launched (mock) prediction market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub question: String,
    pub description: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
    /// YES price as a percentage
    pub yes_price: Decimal,
    /// NO price as a percentage
    pub no_price: Decimal,
    /// Traded volume in USD
    pub volume: Decimal,
    /// Pool liquidity in USD
    pub liquidity: Decimal,
    pub total_bets: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub creator_address: String,
    pub creator_stake: Decimal,
    pub creator_earnings: Decimal,
    pub status: MarketStatus,
    pub confidence: f64,
    pub oracle_type: OracleType,
}

/// Choices made when launching a reviewed draft
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// End time; defaults to seven days after launch
    pub expires_at: Option<DateTime<Utc>>,
    pub oracle_type: OracleType,
    /// Funds the creator adds to the pool
    pub pool_size: Decimal,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            expires_at: None,
            oracle_type: OracleType::Creator,
            pool_size: dec!(100),
        }
    }
}

impl LaunchOptions {
    /// Check pool size and end time, returning the effective end time
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, MarketError> {
        if self.pool_size < Decimal::ONE {
            return Err(MarketError::PoolTooSmall(self.pool_size));
        }
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now + Duration::days(DEFAULT_DURATION_DAYS));
        if expires_at <= now {
            return Err(MarketError::ExpiryInPast(expires_at));
        }
        Ok(expires_at)
    }
}

/// Market launch and lookup errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Pool must hold at least one dollar
    #[error("Pool size must be at least 1, got {0}")]
    PoolTooSmall(Decimal),
    /// End time must lie in the future
    #[error("End time {0} is not in the future")]
    ExpiryInPast(DateTime<Utc>),
    /// Edited draft left a required field blank
    #[error("Market {0} cannot be empty")]
    EmptyField(&'static str),
    /// Bet amount must be positive
    #[error("Enter a bet amount greater than zero")]
    InvalidAmount,
    /// Outcome price of zero cannot be quoted
    #[error("No price available for {0}")]
    NoPrice(Outcome),
    /// No market with this id in the book
    #[error("Market {0} not found")]
    NotFound(String),
    /// Market book could not be written
    #[error("Failed to write market book: {0}")]
    Storage(#[from] std::io::Error),
    /// Market book could not be serialized
    #[error("Failed to encode market book: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl Market {
    /// Launch a reviewed draft as a fresh market at `now`
    pub fn launch(
        draft: &MarketDraft,
        options: &LaunchOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, MarketError> {
        let question = draft.question.trim();
        if question.is_empty() {
            return Err(MarketError::EmptyField("question"));
        }
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(MarketError::EmptyField("description"));
        }
        let expires_at = options.validate(now)?;

        let title = draft.display_title.trim();

        Ok(Self {
            id: new_market_id(),
            question: question.to_string(),
            description: description.to_string(),
            source_url: draft.source_url.clone(),
            og_image: draft.hero_image.clone(),
            og_title: (!title.is_empty()).then(|| title.to_string()),
            icon_image: draft.icon_image.clone(),
            yes_price: dec!(50),
            no_price: dec!(50),
            volume: Decimal::ZERO,
            liquidity: options.pool_size * dec!(2),
            total_bets: 0,
            created_at: now,
            expires_at,
            creator_address: PLACEHOLDER_CREATOR.to_string(),
            creator_stake: options.pool_size,
            creator_earnings: Decimal::ZERO,
            status: MarketStatus::Active,
            confidence: draft.confidence,
            oracle_type: options.oracle_type,
        })
    }

    /// Creator's fee share of current volume
    pub fn accrued_creator_earnings(&self) -> Decimal {
        (self.volume * CREATOR_FEE_SHARE).round_dp(2)
    }

    /// Time left until expiry, zero once expired
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    /// Quote a mock bet against this market's current price
    pub fn quote(&self, outcome: Outcome, amount: Decimal) -> Result<BetQuote, MarketError> {
        let price = match outcome {
            Outcome::Yes => self.yes_price,
            Outcome::No => self.no_price,
        };
        BetQuote::new(outcome, amount, price)
    }
}

/// Short random identifier
fn new_market_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[cfg(test)]
pub(crate) fn sample_draft() -> MarketDraft {
    MarketDraft {
        question: "Will the launch happen before Friday?".to_string(),
        description: "Resolves YES if the rocket lifts off before Friday.".to_string(),
        display_title: "Launch watch".to_string(),
        confidence: 80.0,
        source_url: "https://example.com/launch".to_string(),
        hero_image: Some("https://example.com/launch.png".to_string()),
        icon_image: None,
    }
}
