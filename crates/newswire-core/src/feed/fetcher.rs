use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;

use super::models::{FeedItem, FeedSource};
use super::parser::parse_feed;
use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_FEED_BYTES: usize = 5 * 1024 * 1024;

const ACCEPT_FEED: &str =
    "application/rss+xml,application/atom+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.7";

/// Transport seam for pulling a source's entries.
///
/// The aggregation service only depends on this trait, so tests can swap in
/// a canned transport and observe exactly when network cycles happen.
#[async_trait]
pub trait FetchItems: Send + Sync {
    async fn fetch_items(&self, source: &FeedSource) -> Result<Vec<FeedItem>>;
}

/// HTTP feed fetcher shared across all configured sources
pub struct FeedFetcher {
    client: Client,
    user_agent: String,
    max_items: usize,
}

impl FeedFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch.request_timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            user_agent: config.fetch.user_agent.clone(),
            max_items: config.news.max_items_per_source,
        })
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_FEED));
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers
    }
}

#[async_trait]
impl FetchItems for FeedFetcher {
    async fn fetch_items(&self, source: &FeedSource) -> Result<Vec<FeedItem>> {
        tracing::info!("Fetching feed from: {}", source.url);

        let response = self
            .client
            .get(&source.url)
            .headers(self.build_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchStatus {
                status: status.as_u16(),
                url: source.url.clone(),
            });
        }

        let content = response.bytes().await?;
        if content.len() > MAX_FEED_BYTES {
            return Err(Error::FeedParse(format!(
                "Feed too large ({} bytes) for URL: {}",
                content.len(),
                source.url
            )));
        }

        let mut items = parse_feed(&content)?;
        // Bound work per cycle regardless of how much history the feed carries
        items.truncate(self.max_items);

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source(url: String) -> FeedSource {
        FeedSource {
            name: "Example".to_string(),
            url,
        }
    }

    fn rss_with_items(count: usize) -> String {
        let mut body = String::from(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>T</title>",
        );
        for i in 0..count {
            body.push_str(&format!(
                "<item><title>Item {i}</title><link>https://example.com/{i}</link></item>"
            ));
        }
        body.push_str("</channel></rss>");
        body
    }

    #[tokio::test]
    async fn truncates_to_most_recent_items() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/feed.xml");
                then.status(200).body(rss_with_items(40));
            })
            .await;

        let mut config = AppConfig::default();
        config.news.max_items_per_source = 15;
        let fetcher = FeedFetcher::new(&config).unwrap();

        let items = fetcher
            .fetch_items(&source(server.url("/feed.xml")))
            .await
            .unwrap();
        assert_eq!(items.len(), 15);
        assert_eq!(items[0].title.as_deref(), Some("Item 0"));
    }

    #[tokio::test]
    async fn http_error_statuses_fail_the_source() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/feed.xml");
                then.status(503);
            })
            .await;

        let fetcher = FeedFetcher::new(&AppConfig::default()).unwrap();
        let err = fetcher
            .fetch_items(&source(server.url("/feed.xml")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FetchStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_feed_fails_the_source() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/feed.xml");
                then.status(200).body("not a feed");
            })
            .await;

        let fetcher = FeedFetcher::new(&AppConfig::default()).unwrap();
        let err = fetcher
            .fetch_items(&source(server.url("/feed.xml")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FeedParse(_)));
    }
}
