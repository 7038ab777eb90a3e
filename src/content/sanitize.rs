use super::html::{attr_value, is_void, tokenize, HtmlToken};
use super::markers::strip_enhancement_markers;
use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^<>]*>").unwrap());

const ALLOWED: &[&str] = &[
    "p", "br", "hr", "strong", "b", "em", "i", "u", "s", "code", "pre", "ul", "ol", "li", "h1",
    "h2", "h3", "h4", "h5", "h6", "blockquote", "div",
];

/// Rich-text HTML for the `original` variant.
///
/// Only structural/formatting tags from a fixed allowlist survive, always without attributes,
/// plus links whose `href` is plain `http(s)`; everything else is unwrapped to its text. Plain text is escaped and split into paragraphs.
/// Enhancement markers are removed before and after, so the original never shows AI artifacts.
pub(crate) fn sanitize_rich_text(raw: &str) -> String {
    let cleaned = strip_enhancement_markers(raw);
    let html = if MARKUP.is_match(&cleaned) {
        sanitize_markup(&cleaned)
    } else {
        plain_text_to_html(&cleaned)
    };
    strip_enhancement_markers(&html)
}

/// `href` for a kept link: absolute `http`/`https` only. Entities in the source stay encoded.
fn safe_href(attrs: &str) -> Option<String> {
    let href = attr_value(attrs, "href")?.trim();
    let lower = href.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return None;
    }
    Some(escape_angle_brackets(href).replace('"', "&quot;"))
}

fn sanitize_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut skip_depth = 0usize;
    // One entry per open `<a>`: whether it was emitted.
    let mut links: Vec<bool> = Vec::new();

    for token in tokenize(input) {
        match token {
            HtmlToken::Open {
                name,
                attrs,
                self_closing,
            } => {
                if name == "script" || name == "style" {
                    if !self_closing {
                        skip_depth += 1;
                    }
                    continue;
                }
                if name == "a" && skip_depth == 0 {
                    let href = safe_href(attrs);
                    if let Some(href) = &href {
                        out.push_str(&format!(
                            "<a href=\"{href}\" rel=\"noopener noreferrer\" target=\"_blank\">"
                        ));
                    }
                    if self_closing {
                        if href.is_some() {
                            out.push_str("</a>");
                        }
                    } else {
                        links.push(href.is_some());
                    }
                    continue;
                }
                if skip_depth > 0 || !ALLOWED.contains(&name.as_str()) {
                    continue;
                }
                out.push('<');
                out.push_str(&name);
                out.push('>');
                if self_closing && !is_void(&name) {
                    out.push_str(&format!("</{name}>"));
                }
            }
            HtmlToken::Close { name } => {
                if name == "script" || name == "style" {
                    skip_depth = skip_depth.saturating_sub(1);
                    continue;
                }
                if name == "a" && skip_depth == 0 {
                    if links.pop() == Some(true) {
                        out.push_str("</a>");
                    }
                    continue;
                }
                if skip_depth > 0 || is_void(&name) || !ALLOWED.contains(&name.as_str()) {
                    continue;
                }
                out.push_str(&format!("</{name}>"));
            }
            HtmlToken::Text(t) => {
                if skip_depth == 0 {
                    out.push_str(&escape_angle_brackets(t));
                }
            }
            HtmlToken::Skipped => {}
        }
    }

    // Close links left open by truncated markup.
    for emitted in links.into_iter().rev() {
        if emitted {
            out.push_str("</a>");
        }
    }
    out
}

fn escape_angle_brackets(t: &str) -> String {
    t.replace('<', "&lt;").replace('>', "&gt;")
}

pub(crate) fn escape_html(t: &str) -> String {
    t.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn plain_text_to_html(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let lines: Vec<String> = p.lines().map(escape_html).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist_drops_attributes_and_unknown_tags() {
        let html = "<p class=\"x\" onclick=\"evil()\">Hi <a href=\"javascript:x\">there</a></p>\
                    <img src=x onerror=alert(1)><script>alert(1)</script><ul><li>a</li></ul>";
        assert_eq!(
            sanitize_rich_text(html),
            "<p>Hi there</p><ul><li>a</li></ul>"
        );
    }

    #[test]
    fn test_http_links_are_kept() {
        let html = "<p>See <a href=\"https://example.com/a?b=1&amp;c=2\" onclick=\"x()\">docs</a> \
                    and <a href=\"HTTP://x.test\">x</a> but not <a href=\"data:text/html,hi\">this</a>\
                    </p><p><a href=\"https://open.test\">open";
        assert_eq!(
            sanitize_rich_text(html),
            "<p>See <a href=\"https://example.com/a?b=1&amp;c=2\" rel=\"noopener noreferrer\" \
             target=\"_blank\">docs</a> and <a href=\"HTTP://x.test\" rel=\"noopener noreferrer\" \
             target=\"_blank\">x</a> but not this</p><p><a href=\"https://open.test\" \
             rel=\"noopener noreferrer\" target=\"_blank\">open</a>"
        );
    }

    #[test]
    fn test_markers_are_removed_from_original() {
        let html = "<p>Base [AI_ENHANCED]added[/AI_ENHANCED] text</p>";
        assert_eq!(sanitize_rich_text(html), "<p>Base added text</p>");
    }

    #[test]
    fn test_plain_text_is_escaped_into_paragraphs() {
        assert_eq!(
            sanitize_rich_text("a < b & c\nnext\n\nsecond"),
            "<p>a &lt; b &amp; c<br>next</p><p>second</p>"
        );
    }

    #[test]
    fn test_entities_in_markup_are_kept() {
        assert_eq!(
            sanitize_rich_text("<p>Tom &amp; Jerry</p>"),
            "<p>Tom &amp; Jerry</p>"
        );
    }
}
