//! Candidate scoring for the extraction pass.
//!
//! A candidate is any container element holding paragraph-like children.
//! Paragraphs earn points from their text (base point, commas, capped length
//! bonus); the candidate collects the full share from direct children and
//! half from grandchildren, then gets adjusted by tag semantics, class/id
//! hints, and link density. The highest-scoring candidate wins.

use scraper::{ElementRef, Html, Selector};

use super::STRIP_TAGS;

const PARAGRAPH_BASE_POINTS: f64 = 1.0;
const POINTS_PER_COMMA: f64 = 1.0;
/// One extra point per this many characters of paragraph text
const TEXT_LENGTH_DIVISOR: f64 = 100.0;
const MAX_TEXT_LENGTH_POINTS: f64 = 3.0;
/// Paragraphs shorter than this carry no signal
const MIN_PARAGRAPH_CHARS: usize = 25;
/// Weight of a class/id hint, positive or negative
const CLASS_HINT_POINTS: f64 = 25.0;
/// Grandchild paragraphs count at half strength
const GRANDCHILD_SHARE: f64 = 0.5;

/// Sentence-level separators counted as structure signal. The CJK comma is
/// included because several configured sources publish Chinese text.
const COMMA_CHARS: &[char] = &[',', '，'];

const POSITIVE_HINTS: &[&str] = &[
    "article", "blog", "body", "content", "entry", "main", "page", "post", "story", "text",
];

const NEGATIVE_HINTS: &[&str] = &[
    "ad-", "adsense", "advert", "banner", "breadcrumb", "combx", "comment", "community",
    "disqus", "extra", "footer", "masthead", "menu", "modal", "nav", "popup", "promo",
    "related", "share", "shoutbox", "sidebar", "social", "sponsor", "tags", "widget",
];

/// Find the container most likely to hold the primary article.
///
/// Returns `None` when the document has no scorable paragraph content at
/// all, which the caller reports as an extraction failure.
pub(super) fn best_candidate(doc: &Html) -> Option<ElementRef<'_>> {
    let candidate_selector =
        Selector::parse("body, article, section, main, div, td, blockquote").unwrap();

    let mut best: Option<(ElementRef<'_>, f64)> = None;

    for element in doc.select(&candidate_selector) {
        if in_stripped_subtree(element) {
            continue;
        }

        if let Some(score) = candidate_score(element) {
            let replace = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if replace {
                best = Some((element, score));
            }
        }
    }

    best.map(|(element, _)| element)
}

/// True for paragraph-like elements that feed points into their ancestors
fn is_paragraph(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "p" | "td" | "pre")
}

fn is_stripped(element: ElementRef<'_>) -> bool {
    STRIP_TAGS.contains(&element.value().name())
}

fn in_stripped_subtree(element: ElementRef<'_>) -> bool {
    if is_stripped(element) {
        return true;
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_stripped)
}

/// Score a candidate from its paragraph children, or `None` when it has no
/// scorable paragraph at all
fn candidate_score(element: ElementRef<'_>) -> Option<f64> {
    let mut paragraph_points = 0.0;
    let mut scored_any = false;

    for child in element.children().filter_map(ElementRef::wrap) {
        if is_stripped(child) {
            continue;
        }

        if is_paragraph(child) {
            if let Some(points) = paragraph_points_for(child) {
                paragraph_points += points;
                scored_any = true;
            }
            continue;
        }

        for grandchild in child.children().filter_map(ElementRef::wrap) {
            if is_paragraph(grandchild) && !is_stripped(grandchild) {
                if let Some(points) = paragraph_points_for(grandchild) {
                    paragraph_points += points * GRANDCHILD_SHARE;
                    scored_any = true;
                }
            }
        }
    }

    if !scored_any {
        return None;
    }

    let base = paragraph_points + tag_points(element.value().name()) + class_points(element);
    Some(base * (1.0 - link_density(element)))
}

fn paragraph_points_for(element: ElementRef<'_>) -> Option<f64> {
    let text: String = element.text().collect();
    let chars = text.trim().chars().count();
    if chars < MIN_PARAGRAPH_CHARS {
        return None;
    }

    let commas = text.chars().filter(|c| COMMA_CHARS.contains(c)).count();
    let length_points =
        (chars as f64 / TEXT_LENGTH_DIVISOR).floor().min(MAX_TEXT_LENGTH_POINTS);

    Some(PARAGRAPH_BASE_POINTS + commas as f64 * POINTS_PER_COMMA + length_points)
}

/// Tag-semantics prior: generic containers are likely article hosts, list
/// and form machinery is not
fn tag_points(name: &str) -> f64 {
    match name {
        "article" | "section" | "main" | "div" => 5.0,
        "td" | "blockquote" | "pre" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    }
}

fn class_points(element: ElementRef<'_>) -> f64 {
    let mut hay = element
        .value()
        .classes()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if let Some(id) = element.value().id() {
        hay.push(' ');
        hay.push_str(&id.to_lowercase());
    }

    let mut points = 0.0;
    if POSITIVE_HINTS.iter().any(|hint| hay.contains(hint)) {
        points += CLASS_HINT_POINTS;
    }
    if NEGATIVE_HINTS.iter().any(|hint| hay.contains(hint)) {
        points -= CLASS_HINT_POINTS;
    }
    points
}

/// Share of a candidate's text that sits inside links
pub(super) fn link_density(element: ElementRef<'_>) -> f64 {
    let link_selector = Selector::parse("a").unwrap();

    let total: usize = element.text().map(|t| t.chars().count()).sum();
    if total == 0 {
        return 0.0;
    }

    let linked: usize = element
        .select(&link_selector)
        .flat_map(|a| a.text())
        .map(|t| t.chars().count())
        .sum();

    linked as f64 / total as f64
}

/// True when the element's class or id marks it as page furniture
pub(super) fn has_negative_hint(element: ElementRef<'_>) -> bool {
    let mut hay = element
        .value()
        .classes()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if let Some(id) = element.value().id() {
        hay.push(' ');
        hay.push_str(&id.to_lowercase());
    }

    NEGATIVE_HINTS.iter().any(|hint| hay.contains(hint))
}
