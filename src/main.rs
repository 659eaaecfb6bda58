use clap::Parser;
use listing_scout::cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "listing_scout=debug"
    } else {
        "listing_scout=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("🏠 Listing Scout - CoinAfrique Scraper");
    info!("======================================");

    cli::run(args).await
}
