use thiserror::Error;

/// Failures raised while scraping a category.
///
/// Only `UnsupportedCategory` ever reaches the caller of a run. Transport and status
/// failures are contained per page, malformed ads per container.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("unsupported category '{0}' (expected one of: villas, terrains, appartements)")]
    UnsupportedCategory(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed ad container: {0}")]
    MalformedAd(String),
}
