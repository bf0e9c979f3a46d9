//! Readability-style extraction: find the block of markup most likely to be
//! the primary article, strip the noise around it, and return a cleaned
//! fragment with document metadata.

mod clean;
mod metadata;
mod score;

use scraper::Html;
use url::Url;

use crate::{Error, Result};

/// Minimum visible characters the cleaned fragment must retain for the
/// extraction to count as successful
const MIN_CONTENT_CHARS: usize = 120;

/// Elements that never contribute content: dropped during cleaning and
/// ignored while scoring
pub(crate) const STRIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "link", "meta",
    "nav", "aside", "header", "footer", "form", "button", "input", "select", "textarea",
    "svg", "canvas", "dialog",
];

/// The extracted article, before the caller attaches its request context
#[derive(Debug, Clone)]
pub struct Extraction {
    pub title: String,
    /// Cleaned HTML fragment retaining inline formatting, links and images
    pub content: String,
    pub site_name: String,
}

/// Extract the readable article out of a raw HTML document.
///
/// `base_url` anchors relative links and images. Fails with
/// [`Error::NoContent`] when no candidate region scores at all or the
/// cleaned fragment keeps too little text to be worth reading; callers
/// treat that as a recoverable, domain-level outcome.
pub fn extract(html: &str, base_url: &str) -> Result<Extraction> {
    let base = Url::parse(base_url)?;
    let doc = Html::parse_document(html);

    let candidate = score::best_candidate(&doc).ok_or(Error::NoContent)?;

    let cleaned = clean::render_fragment(candidate, &base);
    if cleaned.text_chars < MIN_CONTENT_CHARS {
        return Err(Error::NoContent);
    }

    Ok(Extraction {
        title: metadata::document_title(&doc),
        content: cleaned.html,
        site_name: metadata::site_name(&doc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://news.example.com/2025/01/story";

    fn article_page() -> String {
        let para = "The launch brings a substantially larger context window, \
                    faster streaming responses, and a lower price per token for teams.";
        format!(
            r#"<html>
              <head><meta property="og:site_name" content="Example News"></head>
              <body>
                <nav class="site-nav">
                  <ul>
                    <li><a href="/home">Home</a></li>
                    <li><a href="/tech">Tech</a></li>
                    <li><a href="/about">About</a></li>
                  </ul>
                </nav>
                <article>
                  <h1>Title</h1>
                  <p>{para} First paragraph, with details.</p>
                  <p>{para} Second paragraph, with context.</p>
                  <p>{para} Third paragraph, with a conclusion.</p>
                </article>
              </body>
            </html>"#
        )
    }

    #[test]
    fn extracts_article_and_excludes_nav() {
        let extraction = extract(&article_page(), BASE).unwrap();

        assert_eq!(extraction.title, "Title");
        assert!(extraction.content.contains("First paragraph"));
        assert!(extraction.content.contains("Second paragraph"));
        assert!(extraction.content.contains("Third paragraph"));
        assert!(!extraction.content.contains("/home"));
        assert!(!extraction.content.contains("site-nav"));
    }

    #[test]
    fn nav_only_page_yields_no_content() {
        let html = r#"<html><body>
            <nav><ul>
              <li><a href="/a">Section A</a></li>
              <li><a href="/b">Section B</a></li>
            </ul></nav>
          </body></html>"#;

        let err = extract(html, BASE).unwrap_err();
        assert!(matches!(err, Error::NoContent));
    }

    #[test]
    fn empty_document_yields_no_content() {
        let err = extract("", BASE).unwrap_err();
        assert!(matches!(err, Error::NoContent));
    }

    #[test]
    fn relative_links_and_images_are_resolved() {
        let para = "A paragraph long enough to clear the scoring threshold, \
                    describing the screenshot below in some detail for readers.";
        let html = format!(
            r#"<html><body><article>
                <p>{para}</p>
                <p>{para}</p>
                <p>See <a href="/docs/changelog">the changelog</a>.
                   <img src="/img/shot.png" alt="screenshot"></p>
              </article></body></html>"#
        );

        let extraction = extract(&html, BASE).unwrap();
        assert!(extraction
            .content
            .contains("https://news.example.com/docs/changelog"));
        assert!(extraction
            .content
            .contains("https://news.example.com/img/shot.png"));
    }

    #[test]
    fn scripts_and_ads_inside_the_article_are_dropped() {
        let para = "Body text that should survive cleaning because it is the \
                    actual article content readers came to this page for.";
        let html = format!(
            r#"<html><body><article>
                <p>{para}</p>
                <script>alert("tracking")</script>
                <div class="ad-banner"><a href="/buy">Buy now</a></div>
                <p>{para}</p>
              </article></body></html>"#
        );

        let extraction = extract(&html, BASE).unwrap();
        assert!(!extraction.content.contains("alert"));
        assert!(!extraction.content.contains("Buy now"));
        assert!(extraction.content.contains("actual article content"));
    }

    #[test]
    fn site_name_defaults_to_generic_label() {
        let extraction = extract(&article_page(), BASE).unwrap();
        assert_eq!(extraction.site_name, "Example News");

        let bare = article_page().replace(
            r#"<meta property="og:site_name" content="Example News">"#,
            "",
        );
        let extraction = extract(&bare, BASE).unwrap();
        assert_eq!(extraction.site_name, "Source");
    }

    #[test]
    fn og_title_wins_over_heading() {
        let page = article_page().replace(
            "<head>",
            r#"<head><meta property="og:title" content="Official Headline">"#,
        );
        let extraction = extract(&page, BASE).unwrap();
        assert_eq!(extraction.title, "Official Headline");
    }
}
