use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::info;
use url::Url;

use crate::config::Config;
use crate::errors::{FeedResult, FetchError};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_EN: &str = "en-US,en;q=0.5";

/// Source of listing-page markup
#[cfg_attr(test, mockall::automock)]
pub trait PageFetcher {
    /// Fetch the page body, failing on network errors and non-2xx responses
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct FetchService {
    client: Client,
}

impl FetchService {
    pub fn new(config: &Config) -> FeedResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_EN));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client })
    }
}

impl PageFetcher for FetchService {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        info!("Fetching {}", url);

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text()?;
        info!("Fetched {} bytes", body.len());

        Ok(body)
    }
}
