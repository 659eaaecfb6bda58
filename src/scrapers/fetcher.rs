use crate::error::ScrapeError;
use crate::scrapers::traits::PageSource;
use crate::scrapers::types::ScrapeConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::Html;
use tracing::{debug, warn};

/// HTTP page fetcher. Owns one client, so connections are reused for its lifetime.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ScrapeConfig::default())
    }

    pub fn with_config(config: &ScrapeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .context("Invalid Accept-Language header")?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for PageFetcher {
    async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ScrapeError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        "CoinAfrique"
    }
}

/// Listing URL for a given page; page 1 is the bare category URL
pub fn page_url(category_url: &str, page: u32) -> String {
    if page > 1 {
        format!("{}?page={}", category_url, page)
    } else {
        category_url.to_string()
    }
}

/// Fetch and parse one listing page.
///
/// Failures are logged and turned into `None`; the caller counts the page as empty.
pub async fn fetch_document<S>(source: &S, category_url: &str, page: u32) -> Option<Html>
where
    S: PageSource + ?Sized,
{
    let url = page_url(category_url, page);
    match source.get(&url).await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            warn!("Failed to load page {} from {}: {}", page, source.source_name(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    struct Canned(Result<&'static str, u16>);

    #[async_trait]
    impl PageSource for Canned {
        async fn get(&self, url: &str) -> Result<String, ScrapeError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(code) => Err(ScrapeError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::from_u16(code).unwrap(),
                }),
            }
        }

        fn source_name(&self) -> &'static str {
            "canned"
        }
    }

    #[test]
    fn first_page_uses_bare_url() {
        let base = "https://sn.coinafrique.com/categorie/villas";
        assert_eq!(page_url(base, 1), base);
        assert_eq!(page_url(base, 0), base);
        assert_eq!(
            page_url(base, 3),
            "https://sn.coinafrique.com/categorie/villas?page=3"
        );
    }

    #[tokio::test]
    async fn failed_fetch_yields_no_document() {
        let source = Canned(Err(503));
        assert!(fetch_document(&source, "https://example.test/categorie/villas", 2)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn successful_fetch_is_parsed() {
        let source = Canned(Ok("<html><body><p>hello</p></body></html>"));
        let doc = fetch_document(&source, "https://example.test/categorie/villas", 1)
            .await
            .expect("document");
        let text: String = doc.root_element().text().collect();
        assert!(text.contains("hello"));
    }

    #[test]
    fn fetcher_builds_with_defaults() {
        assert!(PageFetcher::new().is_ok());
    }

    /// Accept one connection, answer with `status_line`, and echo the request head as the body
    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&head).into_owned();

            let response = format!(
                "{}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                request.len(),
                request
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/categorie/villas", addr), server)
    }

    #[tokio::test]
    async fn get_sends_browser_headers() {
        let (url, server) = serve_once("HTTP/1.1 200 OK").await;
        let body = PageFetcher::new().unwrap().get(&url).await.unwrap();
        let request = server.await.unwrap().to_lowercase();

        assert!(request.starts_with("get /categorie/villas http/1.1"));
        assert!(request.contains("user-agent: mozilla/5.0"));
        assert!(request.contains("accept-language: fr-fr,fr;q=0.9,en;q=0.8"));
        assert!(request.contains("accept: text/html"));
        assert_eq!(body.to_lowercase(), request);
    }

    #[tokio::test]
    async fn get_reports_non_success_status() {
        let (url, server) = serve_once("HTTP/1.1 404 Not Found").await;
        let err = PageFetcher::new().unwrap().get(&url).await.unwrap_err();
        server.await.unwrap();

        match err {
            ScrapeError::Status { url: failed, status } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(failed, url);
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_reports_refused_connection_as_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = PageFetcher::new()
            .unwrap()
            .get(&format!("http://{}/categorie/villas", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Transport { .. }));
    }
}
