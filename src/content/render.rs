use super::markers::{HIGHLIGHT_CLOSE, HIGHLIGHT_OPEN};
use super::normalize::{ENRICHED_SPAN_CLOSE, ENRICHED_SPAN_OPEN};
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(?:[-*+]|(\d+)\.)\s+(.*)$").unwrap());

static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    /// Enriched-content styling span kept through normalization.
    Enriched(String),
    /// AI-added text on the improved-clarity highlighting path.
    Highlight(Vec<Inline>),
    LineBreak,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ListItem {
    pub depth: usize,
    pub content: Vec<Inline>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List { ordered: bool, items: Vec<ListItem> },
    Quote(Vec<Block>),
    Code(String),
    Rule,
}

/// Parse the markdown subset produced by the normalizer into blocks.
pub(crate) fn parse_blocks(markdown: &str) -> Vec<Block> {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut blocks = Vec::new();
    let mut para: Vec<&str> = Vec::new();
    let mut i = 0;

    let flush = |para: &mut Vec<&str>, blocks: &mut Vec<Block>| {
        if !para.is_empty() {
            blocks.push(Block::Paragraph(join_lines(para)));
            para.clear();
        }
    };

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.is_empty() {
            flush(&mut para, &mut blocks);
            i += 1;
            continue;
        }

        if trimmed.starts_with("```") {
            flush(&mut para, &mut blocks);
            let mut code: Vec<&str> = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim_start().starts_with("```") {
                code.push(lines[i]);
                i += 1;
            }
            // Skip the closing fence (if any).
            i += 1;
            blocks.push(Block::Code(code.join("\n")));
            continue;
        }

        if let Some(caps) = HEADING.captures(line) {
            flush(&mut para, &mut blocks);
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                content: parse_inlines(&caps[2]),
            });
            i += 1;
            continue;
        }

        if RULE.is_match(trimmed) {
            flush(&mut para, &mut blocks);
            blocks.push(Block::Rule);
            i += 1;
            continue;
        }

        if trimmed.starts_with('>') {
            flush(&mut para, &mut blocks);
            let mut inner: Vec<&str> = Vec::new();
            while i < lines.len() && lines[i].trim_start().starts_with('>') {
                let l = lines[i].trim_start();
                let l = l.strip_prefix("> ").or_else(|| l.strip_prefix('>')).unwrap_or(l);
                inner.push(l);
                i += 1;
            }
            blocks.push(Block::Quote(parse_blocks(&inner.join("\n"))));
            continue;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            flush(&mut para, &mut blocks);
            let ordered = caps.get(2).is_some();
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(c) = LIST_ITEM.captures(lines[i]) else {
                    break;
                };
                items.push(ListItem {
                    depth: c[1].len() / 2,
                    content: parse_inlines(&c[3]),
                });
                i += 1;
            }
            blocks.push(Block::List { ordered, items });
            continue;
        }

        para.push(trimmed);
        i += 1;
    }

    flush(&mut para, &mut blocks);
    blocks
}

fn join_lines(lines: &[&str]) -> Vec<Inline> {
    let mut out = Vec::new();
    for (n, line) in lines.iter().enumerate() {
        if n > 0 {
            out.push(Inline::LineBreak);
        }
        out.extend(parse_inlines(line));
    }
    out
}

/// Inline syntax: `**strong**`, `*emphasis*`, `` `code` ``, enriched spans and highlight
/// delimiters. Unmatched delimiters are literal text, except highlight delimiters which are dropped.
pub(crate) fn parse_inlines(s: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut rest = s;

    let flush = |text: &mut String, out: &mut Vec<Inline>| {
        if !text.is_empty() {
            out.push(Inline::Text(std::mem::take(text)));
        }
    };

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**").filter(|&e| e > 0) {
                flush(&mut text, &mut out);
                out.push(Inline::Strong(parse_inlines(&after[..end])));
                rest = &after[end + 2..];
                continue;
            }
        } else if c == '*' {
            let after = &rest[1..];
            if let Some(end) = after.find('*').filter(|&e| e > 0) {
                let inner = &after[..end];
                if !inner.starts_with(' ') && !inner.ends_with(' ') {
                    flush(&mut text, &mut out);
                    out.push(Inline::Emphasis(parse_inlines(inner)));
                    rest = &after[end + 1..];
                    continue;
                }
            }
        } else if c == '`' {
            let after = &rest[1..];
            if let Some(end) = after.find('`') {
                flush(&mut text, &mut out);
                out.push(Inline::Code(after[..end].to_string()));
                rest = &after[end + 1..];
                continue;
            }
        } else if c == HIGHLIGHT_OPEN {
            let after = &rest[c.len_utf8()..];
            if let Some(end) = after.find(HIGHLIGHT_CLOSE) {
                flush(&mut text, &mut out);
                out.push(Inline::Highlight(parse_inlines(&after[..end])));
                rest = &after[end + HIGHLIGHT_CLOSE.len_utf8()..];
            } else {
                rest = after;
            }
            continue;
        } else if c == HIGHLIGHT_CLOSE {
            rest = &rest[c.len_utf8()..];
            continue;
        } else if let Some(after) = rest.strip_prefix(ENRICHED_SPAN_OPEN) {
            if let Some(end) = after.find(ENRICHED_SPAN_CLOSE) {
                flush(&mut text, &mut out);
                out.push(Inline::Enriched(after[..end].to_string()));
                rest = &after[end + ENRICHED_SPAN_CLOSE.len()..];
                continue;
            }
        }

        text.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush(&mut text, &mut out);
    out
}

/// Flatten inline content to plain text (used for titles and plain-text fallbacks).
pub(crate) fn inline_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for i in inlines {
        match i {
            Inline::Text(t) | Inline::Code(t) | Inline::Enriched(t) => out.push_str(t),
            Inline::Strong(c) | Inline::Emphasis(c) | Inline::Highlight(c) => {
                out.push_str(&inline_text(c))
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_inline_emphasis_and_code() {
        assert_eq!(
            parse_inlines("a **b** *c* `d` e"),
            vec![
                text("a "),
                Inline::Strong(vec![text("b")]),
                text(" "),
                Inline::Emphasis(vec![text("c")]),
                text(" "),
                Inline::Code("d".to_string()),
                text(" e"),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiters_are_literal() {
        assert_eq!(parse_inlines("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
        assert_eq!(parse_inlines("**open"), vec![text("**open")]);
    }

    #[test]
    fn test_highlight_and_enriched_spans() {
        let s = "x \u{E010}new **bit**\u{E011} <span class=\"enriched-content\">ctx</span>";
        assert_eq!(
            parse_inlines(s),
            vec![
                text("x "),
                Inline::Highlight(vec![text("new "), Inline::Strong(vec![text("bit")])]),
                text(" "),
                Inline::Enriched("ctx".to_string()),
            ]
        );
        assert_eq!(parse_inlines("a\u{E010}b"), vec![text("ab")]);
    }

    #[test]
    fn test_blocks() {
        let md = concat!(
            "# Title\n\nPara one\nline two\n\n- a\n  - b\n\n1. x\n2. y\n\n",
            "> **✨ AI Enhanced**\n>\n> added\n\n```\ncode\n```\n\n---",
        );
        let blocks = parse_blocks(md);
        assert_eq!(blocks.len(), 7);
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 1,
                content: vec![text("Title")]
            }
        );
        assert_eq!(
            blocks[1],
            Block::Paragraph(vec![text("Para one"), Inline::LineBreak, text("line two")])
        );
        match &blocks[2] {
            Block::List { ordered, items } => {
                assert!(!ordered);
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].depth, 1);
            }
            other => panic!("expected list, got {other:?}"),
        }
        assert!(matches!(&blocks[3], Block::List { ordered: true, items } if items.len() == 2));
        match &blocks[4] {
            Block::Quote(inner) => {
                assert_eq!(inner.len(), 2);
                assert_eq!(inner[1], Block::Paragraph(vec![text("added")]));
            }
            other => panic!("expected quote, got {other:?}"),
        }
        assert_eq!(blocks[5], Block::Code("code".to_string()));
        assert_eq!(blocks[6], Block::Rule);
    }

    #[test]
    fn test_inline_text_flattens() {
        let inl = parse_inlines("a **b** \u{E010}c\u{E011}");
        assert_eq!(inline_text(&inl), "a b c");
    }
}
