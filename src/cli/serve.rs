//! Serve command implementation

use crate::config::Config;
use crate::pipeline::MarketGenerator;
use crate::server::{self, AppState};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut server_config = config.server.clone();
        if let Some(host) = &self.host {
            server_config.host = host.clone();
        }
        if let Some(port) = self.port {
            server_config.port = port;
        }

        let state = Arc::new(AppState::new(MarketGenerator::from_config(config)));
        server::serve(&server_config, state).await
    }
}
