//! Bet command implementation

use crate::config::Config;
use crate::market::{MarketStore, Outcome};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct BetArgs {
    /// Market id
    pub id: String,

    /// Side to back
    #[arg(long, value_enum)]
    pub outcome: Outcome,

    /// Stake in USD
    #[arg(long)]
    pub amount: Decimal,
}

impl BetArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let market = MarketStore::new(&config.store.path).get(&self.id)?;
        let quote = market.quote(self.outcome, self.amount)?;

        tracing::info!(market = %market.id, outcome = %quote.outcome, amount = %quote.amount, "Mock bet placed");

        println!("Bet placed! {}", quote.confirmation());
        println!("Win ${} if {} resolves", quote.potential_win, quote.outcome);
        Ok(())
    }
}
