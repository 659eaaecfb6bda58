use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://sn.coinafrique.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for one scraper instance
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root; category paths and detail links are resolved against it
    pub base_url: Url,
    /// Per-request network timeout
    pub timeout: Duration,
    /// Pause between consecutive page fetches
    pub page_delay: Duration,
    pub user_agent: String,
    pub accept_language: String,
    /// Where exported files land
    pub output_dir: PathBuf,
}

impl ScrapeConfig {
    /// Listing URL for a category slug, without any page parameter
    pub fn category_url(&self, slug: &str) -> String {
        format!(
            "{}/categorie/{}",
            self.base_url.as_str().trim_end_matches('/'),
            slug
        )
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
            page_delay: Duration::from_secs(1),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "fr-FR,fr;q=0.9,en;q=0.8".to_string(),
            output_dir: PathBuf::from("data/cleaned"),
        }
    }
}

/// The detail-page link found inside an ad container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailAnchor {
    /// Raw `href`, possibly relative
    pub href: String,
    pub title: Option<String>,
    /// Visible text of the anchor, untrimmed
    pub text: String,
}

/// What the locator knows about the structural parent of a thumbnail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerContent {
    /// Concatenated visible text of the container
    pub text: String,
    pub anchor: Option<DetailAnchor>,
}

/// One ad as located on a listing page, detached from the DOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdContainer {
    pub image_src: String,
    pub image_alt: String,
    /// `None` for a containerless thumbnail
    pub container: Option<ContainerContent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Fetched,
    Failed,
}

/// Progress report emitted after each page of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page index
    pub page: u32,
    pub page_count: u32,
    pub records: usize,
    pub status: PageStatus,
}
