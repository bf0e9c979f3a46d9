use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::config::AppConfig;
use crate::feed::fetcher::{FeedFetcher, FetchItems};
use crate::feed::filter::is_relevant;
use crate::feed::models::{FeedSource, NewsItem};
use crate::news::cache::NewsCache;
use crate::{Error, Result};

/// Aggregates all configured sources into one keyword-filtered, date-sorted
/// list, served from a single-slot TTL cache.
///
/// Refresh is lazy: the first read after expiry pays for the cycle, every
/// read inside the window is served from memory. A cycle that produces zero
/// items installs nothing, so the next read retries immediately instead of
/// caching an outage for a full TTL.
pub struct NewsService {
    sources: Vec<FeedSource>,
    keywords: Vec<String>,
    fetcher: Arc<dyn FetchItems>,
    cache: NewsCache,
}

impl NewsService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let fetcher = Arc::new(FeedFetcher::new(config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build the service around an explicit transport
    pub fn with_fetcher(config: &AppConfig, fetcher: Arc<dyn FetchItems>) -> Self {
        Self {
            sources: config.news.sources.clone(),
            keywords: config.news.keywords.clone(),
            fetcher,
            cache: NewsCache::new(Duration::from_secs(config.news.cache_ttl_secs)),
        }
    }

    /// Return the current aggregated feed, refreshing it when the cached
    /// snapshot has expired
    pub async fn latest(&self) -> Result<Vec<NewsItem>> {
        if let Some(items) = self.cache.get().await {
            tracing::debug!("Serving {} items from cache", items.len());
            return Ok(items);
        }

        self.refresh().await
    }

    /// Run one full aggregation cycle across every source
    async fn refresh(&self) -> Result<Vec<NewsItem>> {
        let mut join_set: JoinSet<(usize, Vec<NewsItem>)> = JoinSet::new();

        for (index, source) in self.sources.iter().cloned().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let keywords = self.keywords.clone();

            join_set.spawn(async move {
                let items = match fetcher.fetch_items(&source).await {
                    Ok(items) => items,
                    Err(e) => {
                        // One bad source never aborts the cycle
                        tracing::warn!("Failed to fetch feed '{}': {}", source.name, e);
                        Vec::new()
                    }
                };

                let kept: Vec<NewsItem> = items
                    .iter()
                    .filter(|item| is_relevant(item, &keywords))
                    .filter_map(|item| NewsItem::from_entry(item, &source.name))
                    .collect();

                tracing::debug!(
                    "Feed '{}': kept {} of {} items",
                    source.name,
                    kept.len(),
                    items.len()
                );

                (index, kept)
            });
        }

        // Tasks finish in any order; reassemble in source order so the
        // stable sort below breaks date ties by feed iteration order
        let mut per_source: Vec<Vec<NewsItem>> = vec![Vec::new(); self.sources.len()];
        while let Some(result) = join_set.join_next().await {
            let (index, items) =
                result.map_err(|e| Error::Other(format!("Task join error: {}", e)))?;
            per_source[index] = items;
        }

        let mut merged: Vec<NewsItem> = per_source.into_iter().flatten().collect();
        merged.sort_by(|a, b| b.date.cmp(&a.date));

        if merged.is_empty() {
            tracing::warn!("Aggregation cycle produced no items; cache left untouched");
            return Ok(merged);
        }

        tracing::info!(
            "Aggregated {} items across {} sources",
            merged.len(),
            self.sources.len()
        );
        self.cache.store(merged.clone()).await;

        Ok(merged)
    }
}
