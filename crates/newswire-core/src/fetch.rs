use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::FetchConfig;
use crate::{Error, Result};

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Fetches raw page HTML for article extraction.
///
/// One bounded GET per call: a browser-like User-Agent and Accept header,
/// a hard timeout that aborts the connection, and non-2xx statuses mapped
/// to typed failures.
pub struct PageFetcher {
    client: Client,
    user_agent: String,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers
    }

    /// Fetch the document at `url`, returning its body as text.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Url::parse(url)?;

        tracing::debug!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| Self::map_request_error(e, url))
    }

    fn map_request_error(error: reqwest::Error, url: &str) -> Error {
        if error.is_timeout() {
            Error::FetchTimeout {
                url: url.to_string(),
            }
        } else {
            Error::Http(error)
        }
    }
}
