//! Status command implementation

use crate::config::{Config, LlmConfig};
use crate::llm::{CompletionProvider, GatewayClient};
use crate::market::MarketStore;

/// Print a summary of the market book and gateway credentials
pub fn print_status(config: &Config) {
    let store = MarketStore::new(&config.store.path);
    let markets = store.load();

    println!("quickbet status");
    println!("  Market book: {}", store.path().display());
    println!("  Markets: {}", markets.len());
    println!(
        "  API key ({}): {}",
        config.llm.api_key_env,
        credential_state(&config.llm)
    );
}

/// Same resolution the pipeline applies per request
fn credential_state(llm: &LlmConfig) -> &'static str {
    match GatewayClient::with_config(llm.clone()).check_credentials() {
        Ok(()) => "present",
        Err(_) => "missing",
    }
}
