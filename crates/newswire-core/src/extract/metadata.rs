//! Best-effort document metadata: headline title and site name.

use scraper::{Html, Selector};

/// Title separators that typically precede a trailing site name
const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " :: "];

/// Minimum characters a separator-stripped title must keep to be trusted
const MIN_STRIPPED_TITLE_CHARS: usize = 10;

const FALLBACK_TITLE: &str = "Untitled";

/// Generic label used when the document does not declare a site name
const FALLBACK_SITE_NAME: &str = "Source";

/// Best-guess headline: Open Graph title, then the `<title>` element with
/// any trailing site suffix stripped, then the first `<h1>`
pub(super) fn document_title(doc: &Html) -> String {
    if let Some(title) = meta_content(doc, "og:title") {
        return title;
    }

    let title_selector = Selector::parse("title").unwrap();
    if let Some(element) = doc.select(&title_selector).next() {
        let text: String = element.text().collect();
        let text = text.trim();
        if !text.is_empty() {
            return strip_site_suffix(text);
        }
    }

    let h1_selector = Selector::parse("h1").unwrap();
    for element in doc.select(&h1_selector) {
        let text: String = element.text().collect();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    FALLBACK_TITLE.to_string()
}

pub(super) fn site_name(doc: &Html) -> String {
    meta_content(doc, "og:site_name").unwrap_or_else(|| FALLBACK_SITE_NAME.to_string())
}

/// Read an Open Graph/meta value by property or name attribute
fn meta_content(doc: &Html, key: &str) -> Option<String> {
    for attr in ["property", "name"] {
        let selector = Selector::parse(&format!(r#"meta[{attr}="{key}"]"#)).unwrap();
        if let Some(content) = doc
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("content"))
        {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }
    None
}

/// "Headline - Site Name" → "Headline", but only when what remains is long
/// enough to still look like a headline
fn strip_site_suffix(title: &str) -> String {
    for separator in TITLE_SEPARATORS {
        if let Some(idx) = title.rfind(separator) {
            let head = title[..idx].trim();
            if head.chars().count() >= MIN_STRIPPED_TITLE_CHARS {
                return head.to_string();
            }
        }
    }
    title.to_string()
}
