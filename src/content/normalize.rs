use super::html::{attr_value, is_void, tokenize, HtmlToken};
use super::markers::{AI_CLOSE, AI_OPEN, ENRICHED_CLOSE, ENRICHED_OPEN};
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub(crate) const ENRICHED_CLASS: &str = "enriched-content";
pub(crate) const ENRICHED_SPAN_OPEN: &str = "<span class=\"enriched-content\">";
pub(crate) const ENRICHED_SPAN_CLOSE: &str = "</span>";

pub(crate) const AI_CALLOUT_LABEL: &str = "> **✨ AI Enhanced**";
pub(crate) const ENRICHED_CALLOUT_LABEL: &str = "> **📚 Enriched**";

const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static MARKUP_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"</?[a-zA-Z][^<>]*>|\bclass\s*=\s*["']|\bdata-[a-z][a-z0-9-]*\s*=\s*["']"#)
        .unwrap()
});

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)</?(?:p|div|section|article|header|footer|figure|table|tr|td|th",
        r"|ul|ol|li|h[1-6]|br|hr|pre|blockquote)\b[^<>]*>",
    ))
    .unwrap()
});

static ENRICHED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b([^<>]*)>(.*?)</span>"#).unwrap()
});

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{E000}(\\d+)\u{E001}").unwrap());

static AI_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[AI_ENHANCED\](.*?)\[/AI_ENHANCED\]").unwrap());

static ENRICHED_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[ENRICHED\](.*?)\[/ENRICHED\]").unwrap());

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

static STRAY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^<>]*>").unwrap());

static INLINE_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]{2,}|\t").unwrap());

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+\S").unwrap());

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(?:[-*+]|(\d+)\.)\s+\S").unwrap());

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.(\s+.*)$").unwrap());

/// What the normalizer saw in its input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ContentMeta {
    pub has_lists: bool,
    pub has_headers: bool,
    pub has_ai_blocks: bool,
    pub has_enriched: bool,
    pub word_count: usize,
    /// Markup was found and converted or stripped.
    pub html_cleaned: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NormalizedContent {
    pub markdown: String,
    pub meta: ContentMeta,
}

impl NormalizedContent {
    /// No cleanup happened and nothing looks like markdown: render as plain text.
    pub fn is_plain_text(&self) -> bool {
        !self.meta.html_cleaned
            && !self.meta.has_lists
            && !self.meta.has_headers
            && !self.meta.has_ai_blocks
            && !self.meta.has_enriched
            && !self.markdown.contains("**")
            && !self.markdown.contains('`')
    }
}

/// Turn stored note content (editor HTML, markdown, plain text, or a mix) into one markdown form.
///
/// Steps, in order:
/// 1. enriched styling spans are swapped for placeholders,
/// 2. markup is converted to markdown through the tag table in [`html_to_markdown`]; input with
///    inline tags only keeps its own line breaks,
/// 3. `[AI_ENHANCED]` / `[ENRICHED]` pairs become labelled blockquote callouts,
/// 4. HTML entities are decoded,
/// 5. leftover tags are stripped and the placeholders restored,
/// 6. whitespace is normalized,
/// 7. headings and lists get blank-line separation and ordered lists are renumbered.
///
/// Never fails; `None` or blank input yields an empty result.
pub(crate) fn normalize(raw: Option<&str>) -> NormalizedContent {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return NormalizedContent::default();
    };

    let (protected_text, spans) = protect_enriched_spans(raw);

    let mut html_cleaned = MARKUP_HINT.is_match(&protected_text);
    let mut text = if !html_cleaned {
        protected_text
    } else if BLOCK_TAG.is_match(&protected_text) {
        html_to_markdown(&protected_text)
    } else {
        inline_html_to_markdown(&protected_text)
    };

    let had_ai_markers = AI_PAIR.is_match(&text);
    let had_enriched_markers = ENRICHED_PAIR.is_match(&text);
    text = rewrite_callouts(&text);

    text = decode_entities(&text);

    if STRAY_TAG.is_match(&text) {
        html_cleaned = true;
        text = STRAY_TAG.replace_all(&text, "").into_owned();
    }

    text = restore_enriched_spans(&text, &spans);
    text = normalize_whitespace(&text);
    let (markdown, has_lists, has_headers) = enforce_block_spacing(&text);

    let meta = ContentMeta {
        has_lists,
        has_headers,
        has_ai_blocks: had_ai_markers || markdown.contains(AI_CALLOUT_LABEL),
        has_enriched: had_enriched_markers
            || !spans.is_empty()
            || markdown.contains(ENRICHED_CALLOUT_LABEL),
        word_count: count_words(&markdown),
        html_cleaned,
    };

    NormalizedContent { markdown, meta }
}

fn protect_enriched_spans(raw: &str) -> (String, Vec<String>) {
    let mut spans = Vec::new();
    let replaced = ENRICHED_SPAN.replace_all(raw, |caps: &Captures<'_>| {
        let is_enriched = attr_value(&caps[1], "class")
            .map(|c| c.split_whitespace().any(|x| x == ENRICHED_CLASS))
            .unwrap_or(false);
        if !is_enriched {
            return caps[0].to_string();
        }

        let inner = STRAY_TAG.replace_all(&caps[2], "");
        let inner = decode_entities(inner.trim());
        spans.push(format!("{ENRICHED_SPAN_OPEN}{inner}{ENRICHED_SPAN_CLOSE}"));
        format!("{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", spans.len() - 1)
    });
    (replaced.into_owned(), spans)
}

fn restore_enriched_spans(text: &str, spans: &[String]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| spans.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .into_owned()
}

fn rewrite_callouts(text: &str) -> String {
    if !text.contains(AI_OPEN) && !text.contains(ENRICHED_OPEN) {
        return text.to_string();
    }
    let text = AI_PAIR.replace_all(text, |caps: &Captures<'_>| {
        callout(AI_CALLOUT_LABEL, &caps[1])
    });
    let text = ENRICHED_PAIR.replace_all(&text, |caps: &Captures<'_>| {
        callout(ENRICHED_CALLOUT_LABEL, &caps[1])
    });
    // Stray halves of a pair carry no meaning once the pairs are gone.
    text.replace(AI_OPEN, "")
        .replace(AI_CLOSE, "")
        .replace(ENRICHED_OPEN, "")
        .replace(ENRICHED_CLOSE, "")
}

fn callout(label: &str, inner: &str) -> String {
    let body = inner
        .trim()
        .lines()
        .map(|l| {
            if l.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", l.trim())
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n{label}\n>\n{body}\n\n")
}

pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let name = &caps[1];
            let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
            let decoded = if let Some(num) = hex {
                u32::from_str_radix(num, 16).ok().and_then(char::from_u32)
            } else if let Some(num) = name.strip_prefix('#') {
                num.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(name)
            };
            match decoded {
                Some('\u{a0}') => " ".to_string(),
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "mdash" => '—',
        "ndash" => '–',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "bull" => '•',
        "middot" => '·',
        "copy" => '©',
        _ => return None,
    })
}

#[derive(Clone, Copy, Debug)]
enum ListFrame {
    Unordered,
    Ordered(u32),
}

/// Single-pass conversion over the tag stream. Each tag name maps to a markdown transform; tags
/// not in the table are unwrapped to their text.
#[derive(Default)]
struct Converter {
    out: String,
    /// One buffer per open `<blockquote>`; prefixed with `> ` when closed.
    quotes: Vec<String>,
    lists: Vec<ListFrame>,
    pre_depth: usize,
    skip_depth: usize,
    /// Text nodes keep their newlines; the source is markdown with inline tags sprinkled in.
    keep_newlines: bool,
}

impl Converter {
    fn cur(&mut self) -> &mut String {
        match self.quotes.last_mut() {
            Some(b) => b,
            None => &mut self.out,
        }
    }

    fn push(&mut self, s: &str) {
        self.cur().push_str(s);
    }

    fn line_break(&mut self) {
        let b = self.cur();
        if !b.is_empty() && !b.ends_with('\n') {
            b.push('\n');
        }
    }

    fn block_break(&mut self) {
        let b = self.cur();
        if b.trim().is_empty() {
            b.clear();
            return;
        }
        while !b.ends_with("\n\n") {
            b.push('\n');
        }
    }

    fn text(&mut self, t: &str) {
        if self.skip_depth > 0 {
            return;
        }
        if self.pre_depth > 0 || self.keep_newlines {
            self.push(t);
            return;
        }
        let flat: String = t
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let at_line_start = {
            let b = self.cur();
            b.is_empty() || b.ends_with('\n') || b.ends_with(' ')
        };
        if at_line_start {
            self.push(flat.trim_start());
        } else {
            self.push(&flat);
        }
    }

    fn open(&mut self, name: &str, attrs: &str, self_closing: bool) {
        if self.skip_depth > 0 {
            if (name == "script" || name == "style") && !self_closing {
                self.skip_depth += 1;
            }
            return;
        }

        match name {
            "script" | "style" => {
                if !self_closing {
                    self.skip_depth += 1;
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                self.block_break();
                self.push(&"#".repeat(level));
                self.push(" ");
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "figure" | "table"
            | "tr" => self.block_break(),
            "td" | "th" => self.push(" "),
            "br" => {
                if self.pre_depth > 0 || !self.cur().is_empty() {
                    self.push("\n");
                }
            }
            "hr" => {
                self.block_break();
                self.push("---");
                self.block_break();
            }
            "strong" | "b" => self.push("**"),
            "em" | "i" => self.push("*"),
            "code" if self.pre_depth == 0 => self.push("`"),
            "pre" => {
                self.block_break();
                self.push("```\n");
                self.pre_depth += 1;
            }
            "ul" | "ol" => {
                if self.lists.is_empty() {
                    self.block_break();
                } else {
                    self.line_break();
                }
                let frame = if name == "ol" {
                    let start = attr_value(attrs, "start")
                        .and_then(|v| v.trim().parse::<u32>().ok())
                        .unwrap_or(1);
                    ListFrame::Ordered(start)
                } else {
                    ListFrame::Unordered
                };
                self.lists.push(frame);
            }
            "li" => {
                self.line_break();
                let depth = self.lists.len().max(1);
                let indent = "  ".repeat(depth - 1);
                let marker = match self.lists.last_mut() {
                    Some(ListFrame::Ordered(n)) => {
                        let m = format!("{n}. ");
                        *n += 1;
                        m
                    }
                    _ => "- ".to_string(),
                };
                self.push(&indent);
                self.push(&marker);
            }
            "blockquote" => {
                self.block_break();
                self.quotes.push(String::new());
            }
            "img" => {
                if let Some(alt) = attr_value(attrs, "alt").filter(|a| !a.trim().is_empty()) {
                    let alt = alt.trim().to_string();
                    self.push(&alt);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        if self.skip_depth > 0 {
            if name == "script" || name == "style" {
                self.skip_depth -= 1;
            }
            return;
        }

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "div" | "section" | "article"
            | "header" | "footer" | "figure" | "table" | "tr" => self.block_break(),
            "strong" | "b" => self.push("**"),
            "em" | "i" => self.push("*"),
            "code" if self.pre_depth == 0 => self.push("`"),
            "pre" if self.pre_depth > 0 => {
                self.line_break();
                self.push("```");
                self.pre_depth -= 1;
                self.block_break();
            }
            "ul" | "ol" => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.block_break();
                } else {
                    self.line_break();
                }
            }
            "li" => self.line_break(),
            "blockquote" => {
                let Some(inner) = self.quotes.pop() else {
                    return;
                };
                let quoted = quote_lines(&inner);
                self.block_break();
                self.push(&quoted);
                self.block_break();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> String {
        while let Some(inner) = self.quotes.pop() {
            let quoted = quote_lines(&inner);
            self.block_break();
            self.push(&quoted);
        }
        self.out
    }
}

fn quote_lines(inner: &str) -> String {
    inner
        .trim()
        .lines()
        .map(|l| {
            if l.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {l}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn html_to_markdown(input: &str) -> String {
    convert(input, Converter::default())
}

/// Inline tags become markdown emphasis in place; line structure is left alone.
fn inline_html_to_markdown(input: &str) -> String {
    convert(
        input,
        Converter {
            keep_newlines: true,
            ..Converter::default()
        },
    )
}

fn convert(input: &str, mut conv: Converter) -> String {
    for token in tokenize(input) {
        match token {
            HtmlToken::Text(t) => conv.text(t),
            HtmlToken::Open {
                name,
                attrs,
                self_closing,
            } => {
                conv.open(&name, attrs, self_closing);
                if self_closing && !is_void(&name) {
                    conv.close(&name);
                }
            }
            HtmlToken::Close { name } => conv.close(&name),
            HtmlToken::Skipped => {}
        }
    }
    conv.finish()
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in text.split('\n') {
        let line = line.trim_end();
        if is_fence(line) {
            in_fence = !in_fence;
            lines.push(line.trim_start().to_string());
            continue;
        }
        if in_fence {
            lines.push(line.to_string());
            continue;
        }

        let body = line.trim_start();
        // Nested list items keep their indentation; every other line is flushed left.
        let indent = if LIST_ITEM.is_match(line) {
            line[..line.len() - body.len()].replace('\t', "  ")
        } else {
            String::new()
        };
        let body = INLINE_WS.replace_all(body, " ");
        lines.push(format!("{indent}{body}"));
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() && out.last().map(|l| l.is_empty()).unwrap_or(true) {
            continue;
        }
        out.push(line);
    }
    while out.last().map(|l| l.is_empty()).unwrap_or(false) {
        out.pop();
    }
    out.join("\n")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind {
    Blank,
    Heading,
    List,
    ListContinuation,
    Other,
}

/// Blank lines around headings and list blocks; ordered items renumbered per contiguous block.
/// Returns the text plus whether any list / heading was seen.
fn enforce_block_spacing(text: &str) -> (String, bool, bool) {
    let mut out: Vec<String> = Vec::new();
    let mut prev = LineKind::Blank;
    let mut in_fence = false;
    // (indent width, next number) per nesting level of the current ordered block.
    let mut counters: Vec<(usize, u32)> = Vec::new();
    let mut has_lists = false;
    let mut has_headers = false;

    for line in text.lines() {
        if is_fence(line) {
            if !in_fence && prev != LineKind::Blank && !out.is_empty() {
                out.push(String::new());
            }
            in_fence = !in_fence;
            out.push(line.to_string());
            prev = LineKind::Other;
            counters.clear();
            continue;
        }
        if in_fence {
            out.push(line.to_string());
            continue;
        }

        let kind = if line.trim().is_empty() {
            LineKind::Blank
        } else if HEADING.is_match(line) {
            LineKind::Heading
        } else if LIST_ITEM.is_match(line) {
            LineKind::List
        } else if line.starts_with(' ')
            && matches!(prev, LineKind::List | LineKind::ListContinuation)
        {
            LineKind::ListContinuation
        } else {
            LineKind::Other
        };

        let mut line = line.to_string();
        match kind {
            LineKind::List => {
                has_lists = true;
                line = renumber(&line, &mut counters);
            }
            LineKind::ListContinuation => {}
            LineKind::Heading => {
                has_headers = true;
                counters.clear();
            }
            _ => counters.clear(),
        }

        let in_list = |k: LineKind| matches!(k, LineKind::List | LineKind::ListContinuation);
        let needs_blank = match kind {
            LineKind::Heading => prev != LineKind::Blank,
            LineKind::List => !in_list(prev) && prev != LineKind::Blank,
            LineKind::Other => prev == LineKind::Heading || in_list(prev),
            _ => false,
        };
        if needs_blank && !out.is_empty() {
            out.push(String::new());
        }

        out.push(line);
        prev = kind;
    }

    (out.join("\n"), has_lists, has_headers)
}

fn renumber(line: &str, counters: &mut Vec<(usize, u32)>) -> String {
    let indent = line.len() - line.trim_start().len();
    counters.retain(|(w, _)| *w <= indent);

    let Some(caps) = ORDERED_ITEM.captures(line) else {
        // An unordered item at this depth ends any ordered run at the same depth.
        counters.retain(|(w, _)| *w < indent);
        return line.to_string();
    };

    let n = match counters.last_mut() {
        Some((w, n)) if *w == indent => {
            *n += 1;
            *n
        }
        _ => {
            counters.push((indent, 1));
            1
        }
    };
    format!("{}{n}.{}", &caps[1], &caps[2])
}

fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_missing_input() {
        assert_eq!(normalize(None), NormalizedContent::default());
        let n = normalize(Some("   \n\t "));
        assert!(n.markdown.is_empty());
        assert_eq!(n.meta, ContentMeta::default());
    }

    #[test]
    fn test_editor_html_becomes_markdown() {
        let html = "<h2>Cells</h2><p>The <strong>nucleus</strong> holds <em>DNA</em>.</p>\
                    <ul><li>membrane</li><li>cytoplasm</li></ul><p>Done&nbsp;&amp; dusted</p>";
        let n = normalize(Some(html));
        assert_eq!(
            n.markdown,
            "## Cells\n\nThe **nucleus** holds *DNA*.\n\n- membrane\n- cytoplasm\n\nDone & dusted"
        );
        assert!(n.meta.html_cleaned);
        assert!(n.meta.has_lists);
        assert!(n.meta.has_headers);
        assert_eq!(n.meta.word_count, 9);
    }

    #[test]
    fn test_ordered_lists_are_renumbered() {
        let n = normalize(Some("Steps:\n3. first\n7. second\n\nThen:\n1. again\n1. more"));
        assert_eq!(
            n.markdown,
            "Steps:\n\n1. first\n2. second\n\nThen:\n\n1. again\n2. more"
        );
    }

    #[test]
    fn test_ol_start_and_nesting() {
        let html = "<ol><li>a<ul><li>x</li></ul></li><li>b</li></ol>";
        let n = normalize(Some(html));
        assert_eq!(n.markdown, "1. a\n  - x\n2. b");
    }

    #[test]
    fn test_blockquote_code_and_breaks() {
        let html = "<blockquote><p>quoted</p></blockquote><p>line one<br>line two</p>\
                    <pre><code>let x = 1;\n  let y = 2;</code></pre><p>inline <code>x</code></p>";
        let n = normalize(Some(html));
        assert_eq!(
            n.markdown,
            "> quoted\n\nline one\nline two\n\n```\nlet x = 1;\n  let y = 2;\n```\n\ninline `x`"
        );
    }

    #[test]
    fn test_anchors_and_spans_are_unwrapped() {
        let n = normalize(Some(
            "<p><a href=\"https://x.test\">link</a> and <span style=\"color:red\">red</span></p>",
        ));
        assert_eq!(n.markdown, "link and red");
    }

    #[test]
    fn test_scripts_are_dropped() {
        let n = normalize(Some("<p>ok</p><script>alert('x')</script>"));
        assert_eq!(n.markdown, "ok");
    }

    #[test]
    fn test_ai_markers_become_callout() {
        let n = normalize(Some("Intro\n\n[AI_ENHANCED]Added context.\nMore.[/AI_ENHANCED]"));
        assert_eq!(
            n.markdown,
            "Intro\n\n> **✨ AI Enhanced**\n>\n> Added context.\n> More."
        );
        assert!(n.meta.has_ai_blocks);
    }

    #[test]
    fn test_callouts_are_not_duplicated_on_second_pass() {
        let first = normalize(Some("Intro [AI_ENHANCED]extra[/AI_ENHANCED] outro"));
        let second = normalize(Some(&first.markdown));
        assert_eq!(first.markdown, second.markdown);
        assert_eq!(second.markdown.matches("AI Enhanced").count(), 1);
        assert!(second.meta.has_ai_blocks);
    }

    #[test]
    fn test_enriched_spans_survive_tag_stripping() {
        let html = "<p>Base <span class=\"enriched-content\">extra &amp; more</span> tail</p>";
        let n = normalize(Some(html));
        assert_eq!(
            n.markdown,
            "Base <span class=\"enriched-content\">extra & more</span> tail"
        );
        assert!(n.meta.has_enriched);

        let again = normalize(Some(&n.markdown));
        assert_eq!(again.markdown, n.markdown);
    }

    #[test]
    fn test_legacy_enriched_markers() {
        let n = normalize(Some("[ENRICHED]Background.[/ENRICHED]"));
        assert_eq!(n.markdown, "> **📚 Enriched**\n>\n> Background.");
        assert!(n.meta.has_enriched);
    }

    #[test]
    fn test_clean_markdown_only_gets_whitespace_fixes() {
        let md = "# Title\n\nSome   text\there.\n\n\n\n- one\n- two\n\n1. a\n2. b";
        let n = normalize(Some(md));
        assert_eq!(
            n.markdown,
            "# Title\n\nSome text here.\n\n- one\n- two\n\n1. a\n2. b"
        );
        assert!(!n.meta.html_cleaned);

        let again = normalize(Some(&n.markdown));
        assert_eq!(again.markdown, n.markdown);
    }

    #[test]
    fn test_plain_text_detection() {
        let n = normalize(Some("just a sentence"));
        assert!(n.is_plain_text());
        assert!(!normalize(Some("<p>x</p>")).is_plain_text());
    }

    #[test]
    fn test_decode_entities_single_pass() {
        assert_eq!(
            decode_entities("a &amp;lt; b &#39;c&#x27; &mdash; &bogus;"),
            "a &lt; b 'c' — &bogus;"
        );
    }

    #[test]
    fn test_markdown_with_inline_tags_keeps_structure() {
        let n = normalize(Some("# Title\n\n- one\n- two\n\nSee <b>this</b>."));
        assert_eq!(n.markdown, "# Title\n\n- one\n- two\n\nSee **this**.");
        assert!(n.meta.html_cleaned);
        assert!(n.meta.has_headers);
        assert!(n.meta.has_lists);

        let mixed = "Intro <span style=\"color:red\">red</span>\n1. a\n2. <em>b</em>";
        let n = normalize(Some(mixed));
        assert_eq!(n.markdown, "Intro red\n\n1. a\n2. *b*");
    }
}
