use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Characters of snippet kept in a NewsItem summary
const SUMMARY_CHARS: usize = 100;

/// A configured syndication endpoint polled on every aggregation cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

/// One entry parsed out of a feed, before filtering
#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Plain-text short summary of the entry
    pub snippet: Option<String>,
    /// Raw per-entry content body as the feed carried it (HTML)
    pub content: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Best-effort image from media metadata or the content body
    pub image: Option<String>,
}

/// An aggregated, filtered item served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsItem {
    /// Map a surviving feed entry to its client-facing form.
    ///
    /// Returns `None` when the entry is missing a title or a link, since both
    /// are required downstream (the id is derived from the link). Entries
    /// without a publish date get the current time, keeping them sortable.
    pub fn from_entry(item: &FeedItem, source: &str) -> Option<Self> {
        let title = item.title.as_deref()?;
        let link = item.link.as_deref()?;

        Some(Self {
            id: base64::engine::general_purpose::STANDARD.encode(link),
            title: title.to_string(),
            summary: item
                .snippet
                .as_deref()
                .map(|s| truncate_chars(s, SUMMARY_CHARS))
                .unwrap_or_default(),
            source: source.to_string(),
            url: link.to_string(),
            date: item.published.unwrap_or_else(Utc::now),
            image_url: item.image.clone(),
        })
    }
}

/// Truncate to at most `max_len` characters on a char boundary,
/// appending an ellipsis when anything was cut off
fn truncate_chars(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    if text.len() <= max_len {
        return text.to_string();
    }

    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if next > max_len {
            break;
        }
        end = next;
    }

    if end == text.len() {
        text.to_string()
    } else {
        format!("{}...", &text[..end])
    }
}
