use crate::error::ScrapeError;
use crate::scrapers::types::{PageProgress, PageStatus};
use async_trait::async_trait;
use tracing::{info, warn};

/// Anything that can return the body of a listing page.
/// The HTTP fetcher implements this; tests swap in canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a page body with a single GET
    async fn get(&self, url: &str) -> Result<String, ScrapeError>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}

/// Receives page-level progress during a run
pub trait ProgressObserver {
    fn on_page(&mut self, progress: PageProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(PageProgress),
{
    fn on_page(&mut self, progress: PageProgress) {
        self(progress)
    }
}

/// Observer that reports progress through the log
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_page(&mut self, p: PageProgress) {
        match p.status {
            PageStatus::Failed => warn!("page {}/{}: fetch failed", p.page, p.page_count),
            PageStatus::Fetched if p.records == 0 => {
                info!("page {}/{}: no listings found", p.page, p.page_count)
            }
            PageStatus::Fetched => {
                info!("page {}/{}: {} listings", p.page, p.page_count, p.records)
            }
        }
    }
}
