use regex::Regex;
use std::sync::LazyLock;

pub(crate) const AI_OPEN: &str = "[AI_ENHANCED]";
pub(crate) const AI_CLOSE: &str = "[/AI_ENHANCED]";
pub(crate) const ENRICHED_OPEN: &str = "[ENRICHED]";
pub(crate) const ENRICHED_CLOSE: &str = "[/ENRICHED]";

/// Inline delimiters for AI-added spans on the highlighting path. Private-use code points, so they
/// survive normalization untouched and never collide with author text.
pub(crate) const HIGHLIGHT_OPEN: char = '\u{E010}';
pub(crate) const HIGHLIGHT_CLOSE: char = '\u{E011}';

static AI_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[AI_ENHANCED\](.*?)\[/AI_ENHANCED\]").unwrap());

static ANY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/?(?:AI_ENHANCED|ENRICHED)\]").unwrap());

// Leading block syntax that must stay outside a highlight delimiter.
static BLOCK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*(?:#{1,6} |[-*+] |\d+\. |> )?)(.*)$").unwrap());

pub(crate) fn has_enhancement_markers(s: &str) -> bool {
    s.contains(AI_OPEN) && s.contains(AI_CLOSE)
}

/// Remove every marker token, keeping the enclosed text.
pub(crate) fn strip_enhancement_markers(s: &str) -> String {
    ANY_MARKER.replace_all(s, "").into_owned()
}

/// Rewrite `[AI_ENHANCED]x[/AI_ENHANCED]` pairs into highlight delimiters.
///
/// Multi-line spans are wrapped per line so each rendered block carries its own pair. Unpaired
/// markers are dropped.
pub(crate) fn to_highlight_delimiters(s: &str) -> String {
    let wrapped = AI_PAIR.replace_all(s, |caps: &regex::Captures<'_>| {
        caps[1]
            .split('\n')
            .map(wrap_line)
            .collect::<Vec<_>>()
            .join("\n")
    });
    strip_enhancement_markers(&wrapped)
}

fn wrap_line(line: &str) -> String {
    if line.trim().is_empty() {
        return line.to_string();
    }
    match BLOCK_PREFIX.captures(line) {
        Some(caps) => format!(
            "{}{HIGHLIGHT_OPEN}{}{HIGHLIGHT_CLOSE}",
            &caps[1],
            &caps[2]
        ),
        None => format!("{HIGHLIGHT_OPEN}{line}{HIGHLIGHT_CLOSE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_markers_needs_a_pair() {
        assert!(has_enhancement_markers("a [AI_ENHANCED]b[/AI_ENHANCED]"));
        assert!(!has_enhancement_markers("a [AI_ENHANCED]b"));
        assert!(!has_enhancement_markers("Some text"));
    }

    #[test]
    fn test_strip_keeps_inner_text() {
        let text = "The [AI_ENHANCED]quick[/AI_ENHANCED] fox [ENRICHED]x[/ENRICHED]";
        assert_eq!(
            strip_enhancement_markers(text),
            "The quick fox x"
        );
    }

    #[test]
    fn test_highlight_delimiters_inline() {
        let out = to_highlight_delimiters("The [AI_ENHANCED]quick[/AI_ENHANCED] fox");
        assert_eq!(out, "The \u{E010}quick\u{E011} fox");
    }

    #[test]
    fn test_highlight_delimiters_multiline_keep_block_prefix() {
        let out = to_highlight_delimiters("[AI_ENHANCED]## Title\n- item\n\nplain[/AI_ENHANCED]");
        assert_eq!(
            out,
            "## \u{E010}Title\u{E011}\n- \u{E010}item\u{E011}\n\n\u{E010}plain\u{E011}"
        );
    }

    #[test]
    fn test_unpaired_marker_is_dropped() {
        assert_eq!(to_highlight_delimiters("a [AI_ENHANCED]b"), "a b");
    }
}
