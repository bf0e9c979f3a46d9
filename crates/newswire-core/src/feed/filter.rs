use super::models::FeedItem;

/// Keyword relevance test applied to every feed entry.
///
/// The scan text is the entry title plus its plain-text snippet, lowercased;
/// one case-insensitive substring hit from the keyword list is enough (OR
/// semantics, no weighting). Entries missing a title or a link never pass:
/// both are required to build a served item.
pub fn is_relevant(item: &FeedItem, keywords: &[String]) -> bool {
    let title = match (&item.title, &item.link) {
        (Some(title), Some(_link)) => title,
        _ => return false,
    };

    let mut scan_text = title.clone();
    if let Some(snippet) = &item.snippet {
        scan_text.push(' ');
        scan_text.push_str(snippet);
    }
    let scan_text = scan_text.to_lowercase();

    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|keyword| scan_text.contains(&keyword.to_lowercase()))
}
