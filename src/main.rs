use clap::Parser;
use quickbet::cli::{Cli, Commands};
use quickbet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _telemetry = quickbet::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Serve(args) => {
            tracing::info!("Starting API server");
            args.execute(&config).await?;
        }
        Commands::Generate(args) => {
            args.execute(&config).await?;
        }
        Commands::Markets(args) => {
            args.execute(&config).await?;
        }
        Commands::Show(args) => {
            args.execute(&config).await?;
        }
        Commands::Bet(args) => {
            args.execute(&config).await?;
        }
        Commands::Status => {
            quickbet::cli::print_status(&config);
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!(
                "  Fetch: timeout={}s max_body={}B",
                config.fetch.timeout_secs, config.fetch.max_body_bytes
            );
            println!("  Gateway: {}", config.llm.base_url);
            println!(
                "  Models: completion={} image={}",
                config.llm.completion_model, config.llm.image_model
            );
            println!("  Icons: {}", config.llm.generate_icon);
            println!("  Store: {}", config.store.path.display());
        }
    }

    Ok(())
}
