use crate::utils::timeout_from_secs;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use url::Url;

/// Outcome of a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// The server answered with a success status; holds the HTML body
    Body(String),
    /// The server answered with a non-success status
    Failed(u16),
}

/// Retrieves the HTML body of a single page
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl PageFetcher {
    /// Create a fetcher whose requests give up after `timeout_secs` (0 waits forever)
    pub fn new(timeout_secs: u64) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, timeout_secs))
    }

    /// Create a fetcher that sends its request through `client`
    pub fn with_client(client: Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout: timeout_from_secs(timeout_secs),
        }
    }

    /// GET the page at `url`.
    ///
    /// A non-success status is reported as [`PageFetch::Failed`]; connection
    /// failures, timeouts and an unparsable URL are returned as errors.
    pub async fn fetch(&self, url: &str) -> Result<PageFetch, Box<dyn Error>> {
        let url = Url::parse(url)?;
        ::log::info!("Fetching page: {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            ::log::debug!("Page request returned {}", status);
            return Ok(PageFetch::Failed(status.as_u16()));
        }

        let body = response.text().await?;
        ::log::debug!("Fetched {} bytes", body.len());

        Ok(PageFetch::Body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/programs")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body><main><a href=\"/x\">X</a></main></body></html>")
            .create_async()
            .await;

        let fetcher = PageFetcher::new(5).unwrap();
        let result = fetcher
            .fetch(&format!("{}/programs", server.url()))
            .await
            .unwrap();

        match result {
            PageFetch::Body(body) => assert!(body.contains("href=\"/x\"")),
            other => panic!("expected body, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = PageFetcher::new(5).unwrap();
        let result = fetcher
            .fetch(&format!("{}/missing", server.url()))
            .await
            .unwrap();

        assert_eq!(result, PageFetch::Failed(404));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = PageFetcher::new(5).unwrap();
        assert!(fetcher.fetch("not-a-valid-url").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_times_out_on_silent_server() {
        // Accepts connections into the backlog but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let fetcher = PageFetcher::new(1).unwrap();
        let started = std::time::Instant::now();
        let err = fetcher
            .fetch(&format!("http://{}/programs", addr))
            .await
            .unwrap_err();

        let err = err.downcast_ref::<reqwest::Error>().unwrap();
        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(10));
        drop(listener);
    }
}
