//! Market listing commands

use crate::config::Config;
use crate::market::{filter_by_question, sort_markets, Market, MarketStore, SortBy};
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug)]
pub struct MarketsArgs {
    /// Listing order
    #[arg(long, value_enum, default_value_t = SortBy::Volume)]
    pub sort: SortBy,

    /// Only show questions containing this text
    #[arg(long)]
    pub search: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl MarketsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let store = MarketStore::new(&config.store.path);
        let mut markets = store.load();
        sort_markets(&mut markets, self.sort);
        let markets = filter_by_question(markets, self.search.as_deref().unwrap_or_default());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&markets)?);
            return Ok(());
        }

        if markets.is_empty() {
            println!("No markets found");
            return Ok(());
        }

        for market in &markets {
            println!("{}", summary_line(market));
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Market id
    pub id: String,
}

impl ShowArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let market = MarketStore::new(&config.store.path).get(&self.id)?;
        let remaining = market.time_remaining(Utc::now());

        println!("{}", market.question);
        println!();
        println!("{}", market.description);
        println!();
        println!("  YES {}%  |  NO {}%", market.yes_price, market.no_price);
        println!(
            "  Volume ${}  Liquidity ${}  Bets {}",
            market.volume, market.liquidity, market.total_bets
        );
        println!(
            "  Ends {} ({}h left)",
            market.expires_at.format("%Y-%m-%d %H:%M UTC"),
            remaining.num_hours()
        );
        println!(
            "  Creator {}  stake ${}  earnings ${}",
            market.creator_address,
            market.creator_stake,
            market.accrued_creator_earnings()
        );
        println!("  Oracle {:?}  Confidence {}%", market.oracle_type, market.confidence);
        println!("  Source {}", market.source_url);
        if let Some(image) = &market.og_image {
            println!("  Image {}", image);
        }
        Ok(())
    }
}

fn summary_line(market: &Market) -> String {
    format!(
        "{:<12}  YES {:>3}%  ${:>10}  ends {}  {}",
        market.id,
        market.yes_price,
        market.volume,
        market.expires_at.format("%Y-%m-%d"),
        market.question
    )
}
