use crate::error::ScrapeError;
use crate::models::{Category, ListingRecord};
use crate::scrapers::extractor::extract;
use crate::scrapers::fetcher::{fetch_document, PageFetcher};
use crate::scrapers::locator::locate_ads;
use crate::scrapers::traits::{PageSource, ProgressObserver};
use crate::scrapers::types::{PageProgress, PageStatus, ScrapeConfig};
use anyhow::Result;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

/// Category scraper for CoinAfrique listing pages
pub struct CoinAfriqueScraper<S = PageFetcher> {
    source: S,
    config: ScrapeConfig,
}

impl CoinAfriqueScraper<PageFetcher> {
    /// Create a scraper backed by the HTTP fetcher
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let source = PageFetcher::with_config(&config)?;
        Ok(Self::with_source(source, config))
    }
}

impl<S: PageSource> CoinAfriqueScraper<S> {
    pub fn with_source(source: S, config: ScrapeConfig) -> Self {
        Self { source, config }
    }

    /// Scrape pages `1..=page_count` of a category, one after another.
    ///
    /// Only an unknown category is an error, and it is reported before any request is
    /// made. Failed or empty pages contribute nothing and the run moves on.
    pub async fn run(
        &self,
        category: &str,
        page_count: u32,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        let category: Category = category.parse()?;
        let url = self.config.category_url(category.slug());

        info!(
            "Starting {} scrape of {} ({} pages)",
            self.source.source_name(),
            category,
            page_count
        );

        let mut all_records = Vec::new();

        for page in 1..=page_count {
            let (records, status) = match fetch_document(&self.source, &url, page).await {
                Some(document) => (
                    extract_listings(&document, &self.config.base_url, page),
                    PageStatus::Fetched,
                ),
                None => (Vec::new(), PageStatus::Failed),
            };

            observer.on_page(PageProgress {
                page,
                page_count,
                records: records.len(),
                status,
            });
            all_records.extend(records);

            if page < page_count && !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        info!(
            "Scraping finished: {} listings collected from {}",
            all_records.len(),
            category
        );
        Ok(all_records)
    }
}

/// Locate and extract every ad on a page, dropping malformed ones
pub fn extract_listings(document: &Html, base_url: &Url, page: u32) -> Vec<ListingRecord> {
    locate_ads(document)
        .iter()
        .enumerate()
        .filter_map(|(idx, ad)| match extract(ad, base_url) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipped ad {} on page {}: {}", idx, page, e);
                None
            }
        })
        .collect()
}
