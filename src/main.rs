//! powersetter-crawler - Stateless PowerSetter electricity-rate scraper CLI
//!
//! A Rust implementation with TLS fingerprint emulation for reliable scraping.

use anyhow::Result;
use clap::{Parser, Subcommand};
use powersetter_crawler::commands::ScrapeCommand;
use powersetter_crawler::config::{Config, OutputFormat};
use powersetter_crawler::store::{JsonlStore, MemoryStore, RateStore};
use powersetter_crawler::utilities;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "powersetter-crawler",
    version,
    about = "Stateless PowerSetter electricity-rate scraper CLI",
    long_about = "Scrapes PowerSetter.com rate-comparison pages one ZIP code at a time \
                  and extracts flat rate-card records."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "PS_PROXY")]
    proxy: Option<String>,

    /// Delay before each request in milliseconds
    #[arg(long, default_value = "5000", global = true, env = "PS_DELAY")]
    delay: u64,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape rate cards for one or more ZIP codes
    #[command(alias = "s")]
    Scrape {
        /// ZIP code(s) to scrape
        #[arg(required = true)]
        zip_codes: Vec<String>,

        /// Maximum fetch attempts per ZIP code
        #[arg(long, default_value = "3")]
        retries: u32,

        /// Maximum rate cards extracted per page
        #[arg(long, default_value = "5")]
        max_cards: usize,

        /// Minimum price filter in cents per kWh
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter in cents per kWh
        #[arg(long)]
        max_price: Option<f64>,

        /// Only keep renewable-energy offers
        #[arg(long)]
        green_only: bool,

        /// Only keep offers without a fee
        #[arg(long)]
        no_fee: bool,

        /// Append records to a JSON-lines file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the known ZIP to utility mappings
    Utilities,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;
    config.delay_ms = cli.delay;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scrape {
            zip_codes,
            retries,
            max_cards,
            min_price,
            max_price,
            green_only,
            no_fee,
            output,
        } => {
            // Apply scrape-specific config
            config.max_retries = retries;
            config.max_cards = max_cards;
            config.min_price = min_price;
            config.max_price = max_price;
            config.green_only = green_only;
            config.no_fee_only = no_fee;

            let mut store: Box<dyn RateStore> = match output {
                Some(path) => Box::new(JsonlStore::open(path)?),
                None => Box::new(MemoryStore::new()),
            };

            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(store.as_mut(), &zip_codes).await?;
            println!("{}", output);
        }

        Commands::Utilities => {
            println!("Known ZIP code to utility mappings:\n");
            println!("{:<8} {}", "ZIP", "Utility");
            println!("{:-<8} {:-<40}", "", "");

            for (zip, utility) in utilities::UTILITIES {
                println!("{:<8} {}", zip, utility);
            }
        }
    }

    Ok(())
}
