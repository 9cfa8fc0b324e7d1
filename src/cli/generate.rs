//! Generate command implementation

use crate::config::Config;
use crate::market::{LaunchOptions, Market, MarketStore, OracleType};
use crate::pipeline::MarketGenerator;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Page to build the market from
    pub url: String,

    /// Save the draft to the market book
    #[arg(long)]
    pub launch: bool,

    /// Funds added to the pool at launch (USD)
    #[arg(long, default_value = "100")]
    pub pool: Decimal,

    /// Days until the market ends (1-365)
    #[arg(long, default_value = "7", value_parser = clap::value_parser!(i64).range(1..=365))]
    pub days: i64,

    /// Who decides the outcome
    #[arg(long, value_enum, default_value_t = OracleType::Creator)]
    pub oracle: OracleType,
}

impl GenerateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        // Reject bad launch options before spending a fetch and model calls
        let launch = if self.launch {
            let now = Utc::now();
            let options = self.launch_options(now);
            options.validate(now)?;
            Some(options)
        } else {
            None
        };

        let generator = MarketGenerator::from_config(config);
        let draft = generator.generate(&self.url).await?;

        println!("{}", serde_json::to_string_pretty(&draft)?);

        if let Some(options) = launch {
            let market = Market::launch(&draft, &options, Utc::now())?;
            let id = market.id.clone();

            MarketStore::new(&config.store.path).save(market)?;
            println!("Market launched: {}", id);
        }

        Ok(())
    }

    fn launch_options(&self, now: DateTime<Utc>) -> LaunchOptions {
        LaunchOptions {
            expires_at: Some(now + Duration::days(self.days)),
            oracle_type: self.oracle,
            pool_size: self.pool,
        }
    }
}
