//! MarketMap CLI - turn a startup market map image into an enriched CSV.
//!
//! The image is read by a vision model, every startup it lists is looked up
//! on Crunchbase, and the result is written as `enriched_market_map.csv`.
//!
//! # Usage
//!
//! ```bash
//! # Extract and enrich (prompts for missing API keys on a terminal)
//! marketmap extract market_map.png
//!
//! # Write somewhere else, or to stdout
//! marketmap extract market_map.png --output startups.csv
//! marketmap extract market_map.png --output -
//!
//! # View configuration
//! marketmap config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// MarketMap - extract startups from a market map image and enrich them.
#[derive(Parser, Debug)]
#[command(name = "marketmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract startups from a market map image and enrich them into a CSV
    Extract(cli::extract::ExtractArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match marketmap_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `marketmap config path`."
            );
            marketmap_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("MarketMap v{}", marketmap_core::VERSION);

    match cli.command {
        Commands::Extract(args) => cli::extract::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
