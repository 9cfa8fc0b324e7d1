//! Mock bet quotes
//!
//! A quote reports what a stake would pay at the current price. Placing a
//! bet changes nothing.

use super::MarketError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a binary market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Yes,
    No,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Yes => write!(f, "YES"),
            Outcome::No => write!(f, "NO"),
        }
    }
}

/// What a stake would pay if the outcome resolves in its favor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetQuote {
    pub outcome: Outcome,
    /// Stake in USD
    pub amount: Decimal,
    /// Outcome price as a percentage
    pub price: Decimal,
    /// Payout in USD, rounded to cents
    pub potential_win: Decimal,
}

impl BetQuote {
    /// Quote `amount` on `outcome` at `price` percent
    pub fn new(outcome: Outcome, amount: Decimal, price: Decimal) -> Result<Self, MarketError> {
        if amount <= Decimal::ZERO {
            return Err(MarketError::InvalidAmount);
        }
        if price <= Decimal::ZERO {
            return Err(MarketError::NoPrice(outcome));
        }

        let potential_win = (amount * dec!(100) / price).round_dp(2);

        Ok(Self {
            outcome,
            amount,
            price,
            potential_win,
        })
    }

    /// Confirmation shown after a mock bet
    pub fn confirmation(&self) -> String {
        format!("You bet ${} on {}", self.amount, self.outcome)
    }
}
