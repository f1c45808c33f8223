use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Dinaticket turns away clients that don't look like a browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server answered with {0}")]
    HttpStatus(StatusCode),
}

/// Downloads event pages, one GET per call and no retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    #[instrument(skip(self))]
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body = response.text().await?;

        debug!("Received {} bytes", body.len());

        Ok(body)
    }
}
