pub mod coinafrique;
pub mod extractor;
pub mod fetcher;
pub mod locator;
pub mod traits;
pub mod types;

pub use coinafrique::CoinAfriqueScraper;
pub use fetcher::PageFetcher;
pub use traits::{LogProgress, PageSource, ProgressObserver};
pub use types::{PageProgress, PageStatus, ScrapeConfig};
