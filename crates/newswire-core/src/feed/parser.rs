use feed_rs::parser;

use super::models::FeedItem;
use crate::{Error, Result};

/// Pull the first usable `<img src>` out of an HTML content body.
///
/// Feeds routinely embed a lead image in the entry body rather than in media
/// metadata, so this is a plain string scan, not a DOM parse.
fn extract_first_image_url(html: &str) -> Option<String> {
    let html_lower = html.to_lowercase();

    if let Some(img_start) = html_lower.find("<img") {
        let remaining = &html[img_start..];

        if let Some(src_start) = remaining.to_lowercase().find("src=") {
            let src_remaining = &remaining[src_start + 4..];

            // Handle both src="url" and src='url'
            let quote_char = src_remaining.chars().next()?;
            if quote_char == '"' || quote_char == '\'' {
                let url_start = 1;
                if let Some(url_end) = src_remaining[url_start..].find(quote_char) {
                    let url = &src_remaining[url_start..url_start + url_end];
                    // Filter out small images (likely icons/tracking pixels)
                    if !url.contains("1x1") && !url.contains("pixel") && !url.contains("tracking") {
                        return Some(url.to_string());
                    }
                }
            }
        }
    }

    None
}

/// Parse RSS/Atom content into per-entry items
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedItem>> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| t.content);
            let link = entry.links.first().map(|l| l.href.clone());

            let summary = entry.summary.map(|s| s.content);
            let content = entry
                .content
                .and_then(|c| c.body)
                .or_else(|| summary.clone());

            let snippet = summary
                .as_deref()
                .or(content.as_deref())
                .map(html_to_text);

            let published = entry.published.or(entry.updated);

            // Prefer media metadata for the image, fall back to the body scan
            let image = entry
                .media
                .first()
                .and_then(|m| m.thumbnails.first())
                .map(|t| t.image.uri.clone())
                .or_else(|| {
                    entry
                        .media
                        .first()
                        .and_then(|m| m.content.first())
                        .and_then(|c| c.url.as_ref())
                        .map(|u| u.to_string())
                })
                .or_else(|| content.as_deref().and_then(extract_first_image_url));

            FeedItem {
                title,
                link,
                snippet,
                content,
                published,
                image,
            }
        })
        .collect();

    Ok(items)
}

/// Convert HTML content to plain text
fn html_to_text(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 80)
        .unwrap_or_else(|_| html.to_string())
        .trim()
        .to_string()
}
