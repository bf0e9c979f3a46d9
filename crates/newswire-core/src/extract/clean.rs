//! Serialization of the winning candidate into a cleaned HTML fragment:
//! noise subtrees dropped, wrapper elements unwrapped, attributes reduced to
//! the few that matter, and relative URLs made absolute.

use scraper::node::Node;
use scraper::ElementRef;
use url::Url;

use super::score::has_negative_hint;
use super::STRIP_TAGS;

/// Tags preserved in the output fragment; everything else is unwrapped
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "a", "img", "em", "strong", "b", "i",
    "u", "s", "code", "pre", "blockquote", "ul", "ol", "li", "figure", "figcaption", "table",
    "thead", "tbody", "tr", "td", "th", "caption", "dl", "dt", "dd", "sub", "sup", "mark",
    "cite", "q", "time", "abbr",
];

/// Structural tags kept even when they hold no text of their own
const KEEP_WHEN_EMPTY: &[&str] = &["td", "th", "tr", "thead", "tbody"];

pub(super) struct Cleaned {
    pub html: String,
    /// Non-whitespace characters visible in the fragment
    pub text_chars: usize,
}

/// Render the inner content of `root` as a cleaned fragment
pub(super) fn render_fragment(root: ElementRef<'_>, base: &Url) -> Cleaned {
    let mut html = String::new();
    let mut text_chars = 0;
    render_children(root, &mut html, &mut text_chars, base, false);
    Cleaned {
        html: html.trim().to_string(),
        text_chars,
    }
}

fn render_children(
    element: ElementRef<'_>,
    out: &mut String,
    text_chars: &mut usize,
    base: &Url,
    in_pre: bool,
) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let raw: &str = text;
                if in_pre {
                    push_escaped_text(out, raw);
                } else {
                    push_escaped_text(out, &collapse_whitespace(raw));
                }
                *text_chars += raw.chars().filter(|c| !c.is_whitespace()).count();
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    render_element(child_element, out, text_chars, base, in_pre);
                }
            }
            _ => {}
        }
    }
}

fn render_element(
    element: ElementRef<'_>,
    out: &mut String,
    text_chars: &mut usize,
    base: &Url,
    in_pre: bool,
) {
    let name = element.value().name();

    if STRIP_TAGS.contains(&name) || has_negative_hint(element) {
        return;
    }

    if !ALLOWED_TAGS.contains(&name) {
        // Wrapper-only element: keep its content, lose the tag
        render_children(element, out, text_chars, base, in_pre);
        return;
    }

    match name {
        "img" => render_img(element, out, base),
        "br" | "hr" => {
            out.push('<');
            out.push_str(name);
            out.push('>');
        }
        "a" => render_link(element, out, text_chars, base, in_pre),
        _ => {
            let mut inner = String::new();
            let mut inner_chars = 0;
            render_children(element, &mut inner, &mut inner_chars, base, in_pre || name == "pre");

            // Empty nodes are noise, unless they are table structure or hold an image
            if inner_chars == 0 && !inner.contains("<img") && !KEEP_WHEN_EMPTY.contains(&name) {
                return;
            }

            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&inner);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
            *text_chars += inner_chars;
        }
    }
}

/// Links keep only a resolved href; a link without one degrades to its text
fn render_link(
    element: ElementRef<'_>,
    out: &mut String,
    text_chars: &mut usize,
    base: &Url,
    in_pre: bool,
) {
    let resolved = element
        .value()
        .attr("href")
        .and_then(|href| base.join(href).ok());

    let mut inner = String::new();
    let mut inner_chars = 0;
    render_children(element, &mut inner, &mut inner_chars, base, in_pre);

    match resolved {
        Some(href) if inner_chars > 0 => {
            out.push_str("<a href=\"");
            push_escaped_attr(out, href.as_str());
            out.push_str("\">");
            out.push_str(&inner);
            out.push_str("</a>");
            *text_chars += inner_chars;
        }
        _ => {
            out.push_str(&inner);
            *text_chars += inner_chars;
        }
    }
}

fn render_img(element: ElementRef<'_>, out: &mut String, base: &Url) {
    let src = match element
        .value()
        .attr("src")
        .and_then(|src| base.join(src).ok())
    {
        Some(src) => src,
        None => return,
    };

    out.push_str("<img src=\"");
    push_escaped_attr(out, src.as_str());
    out.push('"');
    if let Some(alt) = element.value().attr("alt") {
        out.push_str(" alt=\"");
        push_escaped_attr(out, alt);
        out.push('"');
    }
    out.push('>');
}

fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut previous_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !previous_was_space {
                collapsed.push(' ');
            }
            previous_was_space = true;
        } else {
            collapsed.push(ch);
            previous_was_space = false;
        }
    }
    collapsed
}

fn push_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn push_escaped_attr(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
