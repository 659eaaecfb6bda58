use crate::export;
use crate::models::{Category, ListingRecord};
use crate::scrapers::{CoinAfriqueScraper, LogProgress, ScrapeConfig};
use crate::summary::{Coverage, RunOutcome};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Scrape real-estate listings from CoinAfrique Senegal
#[derive(Parser, Debug)]
#[command(name = "listing-scout", version, about, long_about = None)]
pub struct Args {
    /// Category to scrape: villas, terrains or appartements
    #[arg(short, long)]
    pub category: String,

    /// Number of listing pages to scrape
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub pages: u32,

    /// Site root URL
    #[arg(long, default_value = crate::scrapers::types::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory exported files are written to
    #[arg(short, long, default_value = "data/cleaned")]
    pub output_dir: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Print results without writing a file
    #[arg(long)]
    pub no_save: bool,

    /// Delay between page requests in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> Result<ScrapeConfig> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL '{}'", self.base_url))?;

        Ok(ScrapeConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            page_delay: Duration::from_millis(self.delay_ms),
            output_dir: self.output_dir.clone(),
            ..Default::default()
        })
    }
}

/// Run one scrape and present the results
pub async fn run(args: Args) -> Result<()> {
    let config = args.config()?;
    let scraper = CoinAfriqueScraper::new(config.clone())?;

    let result = scraper
        .run(&args.category, args.pages, &mut LogProgress)
        .await;

    let records = match RunOutcome::from_run(&result) {
        RunOutcome::InvalidCategory(c) => bail!(
            "Invalid category '{}'. Choose one of: {}",
            c,
            Category::ALL.map(Category::slug).join(", ")
        ),
        RunOutcome::NoData => {
            println!("No data found. Check the connection or try again.");
            return Ok(());
        }
        RunOutcome::Collected(n) => {
            info!("✅ {} listings collected", n);
            result?
        }
    };

    print_records(&records);
    println!("{}", Coverage::of(&records));

    if args.no_save {
        return Ok(());
    }

    // category already validated by the run
    let category: Category = args.category.parse()?;
    let filename = export::default_filename(category, chrono::Local::now());
    let path = match args.format {
        OutputFormat::Csv => export::export_csv(&records, &config.output_dir, &filename)?,
        OutputFormat::Json => export::export_json(
            &records,
            &config.output_dir.join(filename).with_extension("json"),
        )?,
    };
    info!("💾 Saved {} listings to {}", records.len(), path.display());

    Ok(())
}

fn print_records(records: &[ListingRecord]) {
    for (i, record) in records.iter().enumerate() {
        let title = if record.title.is_empty() {
            &record.description
        } else {
            &record.title
        };
        println!("{}. {} [{}]", i + 1, title, record.listing_type);
        if !record.price.is_empty() {
            println!("   Price: {}", record.price);
        }
        if !record.address.is_empty() {
            println!("   Address: {}", record.address);
        }
        if !record.room_count.is_empty() || !record.surface_area.is_empty() {
            println!("   {} rooms, {}", record.room_count, record.surface_area);
        }
        if !record.listing_link.is_empty() {
            println!("   URL: {}", record.listing_link);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_the_standard_config() {
        let args = Args::parse_from(["listing-scout", "--category", "villas"]);
        assert_eq!(args.pages, 1);
        assert_eq!(args.format, OutputFormat::Csv);

        let config = args.config().unwrap();
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_url.as_str(), "https://sn.coinafrique.com/");
    }

    #[test]
    fn page_count_is_bounded() {
        assert!(Args::try_parse_from(["listing-scout", "-c", "villas", "-p", "0"]).is_err());
        assert!(Args::try_parse_from(["listing-scout", "-c", "villas", "-p", "21"]).is_err());
        assert!(Args::try_parse_from(["listing-scout", "-c", "villas", "-p", "20"]).is_ok());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let args = Args::parse_from(["listing-scout", "-c", "villas", "--base-url", "not a url"]);
        assert!(args.config().is_err());
    }
}
