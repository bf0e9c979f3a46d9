use serde::Serialize;

use crate::config::AppConfig;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::Result;

/// A cleaned, reader-ready article
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    /// Cleaned HTML fragment, not plain text
    pub content: String,
    pub original_url: String,
    pub site_name: String,
}

/// Fetches a single page and runs extraction on it.
///
/// Unlike feed aggregation, this is a single-target operation: partial
/// success is meaningless, so every failure propagates to the caller with
/// enough type information to pick the right response.
pub struct ArticleService {
    fetcher: PageFetcher,
}

impl ArticleService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(&config.fetch)?,
        })
    }

    /// Fetch `url` and extract its readable content
    pub async fn read(&self, url: &str) -> Result<Article> {
        let html = self.fetcher.fetch(url).await?;
        let extraction = extract::extract(&html, url)?;

        tracing::info!(
            "Extracted article '{}' ({} bytes) from {}",
            extraction.title,
            extraction.content.len(),
            url
        );

        Ok(Article {
            title: extraction.title,
            content: extraction.content,
            original_url: url.to_string(),
            site_name: extraction.site_name,
        })
    }
}
