use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::feed::models::NewsItem;

/// One fully aggregated feed snapshot
#[derive(Debug, Clone)]
struct CachedFeed {
    items: Vec<NewsItem>,
    fetched_at: Instant,
}

/// Single-slot cache holding the last successful aggregation cycle.
///
/// The slot is replaced wholesale on every write; readers either see the
/// previous complete snapshot or the new one, never a partial entry. Uses
/// monotonic instants so the TTL clock can be driven from paused-time tests.
pub struct NewsCache {
    slot: RwLock<Option<CachedFeed>>,
    ttl: Duration,
}

impl NewsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Items from the current entry, if one exists and is still within TTL
    pub async fn get(&self) -> Option<Vec<NewsItem>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.items.clone())
    }

    /// Install a fresh snapshot, resetting the TTL clock
    pub async fn store(&self, items: Vec<NewsItem>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedFeed {
            items,
            fetched_at: Instant::now(),
        });
    }
}
