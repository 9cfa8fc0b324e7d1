//! CLI interface for quickbet
//!
//! Provides subcommands for:
//! - `serve`: Run the HTTP API
//! - `generate`: Draft (and optionally launch) a market from a URL
//! - `markets`: List launched markets
//! - `show`: Show one market
//! - `bet`: Quote a mock bet
//! - `status`: Show market book summary
//! - `config`: Show configuration

mod bet;
mod generate;
mod markets;
mod serve;
mod status;

pub use bet::BetArgs;
pub use generate::GenerateArgs;
pub use markets::{MarketsArgs, ShowArgs};
pub use serve::ServeArgs;
pub use status::print_status;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quickbet")]
#[command(about = "Instant prediction market drafts generated from any link")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Draft a market from a URL
    Generate(GenerateArgs),
    /// List launched markets
    Markets(MarketsArgs),
    /// Show one market
    Show(ShowArgs),
    /// Quote a mock bet (nothing is wagered)
    Bet(BetArgs),
    /// Show market book summary
    Status,
    /// Show configuration
    Config,
}
