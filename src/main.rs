use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod output;
mod scrape;
mod telemetry;

use output::config::OutputConfig;

#[derive(Parser)]
#[command(name = "shopscrape", about = "Product page scraper for e-commerce sites")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape product pages from one site
    Scrape(scrape::ScrapeCmd),
    /// List supported sites and their selectors
    Sites(scrape::SitesCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and SHOPSCRAPE_LOG_FORMAT
    telemetry::config::init_tracing();
    let out = OutputConfig::from_env().with_json(cli.json);

    match cli.command {
        Commands::Scrape(args) => scrape::run(args, out).await?,
        Commands::Sites(args) => scrape::list_sites(args, out)?,
    }

    Ok(())
}
