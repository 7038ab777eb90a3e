#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HtmlToken<'a> {
    Text(&'a str),
    Open {
        name: String,
        attrs: &'a str,
        self_closing: bool,
    },
    Close {
        name: String,
    },
    /// Comments, doctypes and processing instructions; dropped by every consumer.
    Skipped,
}

/// Split editor markup into tags and text runs.
///
/// Rules:
/// - A tag starts at `<` followed by a letter (open) or `/` + letter (close).
/// - Quoted attribute values may contain `>`.
/// - `<!-- ... -->` and `<!...>` are skipped.
/// - Anything else, including an unterminated tag, is text.
pub(crate) fn tokenize(input: &str) -> Vec<HtmlToken<'_>> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }

        let Some((token, end)) = read_tag(input, i) else {
            i += 1;
            continue;
        };

        if i > text_start {
            out.push(HtmlToken::Text(&input[text_start..i]));
        }
        out.push(token);
        i = end;
        text_start = end;
    }

    if text_start < bytes.len() {
        out.push(HtmlToken::Text(&input[text_start..]));
    }

    out
}

/// Parse a tag starting at `start` (which must be `<`). Returns the token and the byte index just
/// past the closing `>`.
fn read_tag(input: &str, start: usize) -> Option<(HtmlToken<'_>, usize)> {
    let bytes = input.as_bytes();
    let next = *bytes.get(start + 1)?;

    if input[start..].starts_with("<!--") {
        let end = input[start + 4..].find("-->")? + start + 4 + 3;
        return Some((HtmlToken::Skipped, end));
    }

    if next == b'!' || next == b'?' {
        let end = input[start..].find('>')? + start + 1;
        return Some((HtmlToken::Skipped, end));
    }

    let closing = next == b'/';
    let name_start = if closing { start + 2 } else { start + 1 };
    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }

    let mut name_end = name_start;
    while name_end < bytes.len()
        && (bytes[name_end].is_ascii_alphanumeric() || bytes[name_end] == b'-')
    {
        name_end += 1;
    }
    let name = input[name_start..name_end].to_ascii_lowercase();

    // Find the closing `>`, skipping quoted attribute values.
    let mut quote: Option<u8> = None;
    let mut k = name_end;
    while k < bytes.len() {
        let b = bytes[k];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => break,
            None => {}
        }
        k += 1;
    }
    if k >= bytes.len() {
        return None;
    }

    if closing {
        return Some((HtmlToken::Close { name }, k + 1));
    }

    let raw_attrs = &input[name_end..k];
    let self_closing = raw_attrs.trim_end().ends_with('/');
    let attrs = raw_attrs.trim().trim_end_matches('/').trim_end();

    Some((
        HtmlToken::Open {
            name,
            attrs,
            self_closing,
        },
        k + 1,
    ))
}

/// Value of attribute `key` in a raw attribute string (`class="a b" data-x='y'`).
pub(crate) fn attr_value<'a>(attrs: &'a str, key: &str) -> Option<&'a str> {
    let bytes = attrs.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let name = &attrs[name_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            if name.eq_ignore_ascii_case(key) {
                return Some("");
            }
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let (value, next) = match bytes.get(i) {
            Some(&q) if q == b'"' || q == b'\'' => {
                let rest = &attrs[i + 1..];
                match rest.find(q as char) {
                    Some(end) => (&rest[..end], i + 1 + end + 1),
                    None => (rest, bytes.len()),
                }
            }
            _ => {
                let start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                (&attrs[start..i], i)
            }
        };

        if name.eq_ignore_ascii_case(key) {
            return Some(value);
        }
        i = next;
    }

    None
}

/// Tags that never have content or a closing tag.
pub(crate) fn is_void(name: &str) -> bool {
    matches!(
        name,
        "br" | "hr" | "img" | "input" | "meta" | "link" | "wbr" | "col" | "source"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_tags_and_text() {
        let toks = tokenize("<p class=\"a\">Hi <b>there</b></p>");
        assert_eq!(
            toks,
            vec![
                HtmlToken::Open {
                    name: "p".to_string(),
                    attrs: "class=\"a\"",
                    self_closing: false
                },
                HtmlToken::Text("Hi "),
                HtmlToken::Open {
                    name: "b".to_string(),
                    attrs: "",
                    self_closing: false
                },
                HtmlToken::Text("there"),
                HtmlToken::Close {
                    name: "b".to_string()
                },
                HtmlToken::Close {
                    name: "p".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_stray_angle_brackets_as_text() {
        let toks = tokenize("a < b and 3<4 <unterminated");
        assert_eq!(toks, vec![HtmlToken::Text("a < b and 3<4 <unterminated")]);
    }

    #[test]
    fn test_tokenize_quoted_gt_and_comments() {
        let toks = tokenize("<a title=\"x>y\">t</a><!-- note --><BR/>");
        assert_eq!(toks.len(), 5);
        assert!(matches!(&toks[0], HtmlToken::Open { name, .. } if name == "a"));
        assert_eq!(toks[3], HtmlToken::Skipped);
        assert!(
            matches!(&toks[4], HtmlToken::Open { name, self_closing: true, .. } if name == "br")
        );
    }

    #[test]
    fn test_attr_value() {
        let attrs = "data-id=7 class='enriched-content x' hidden";
        assert_eq!(attr_value(attrs, "class"), Some("enriched-content x"));
        assert_eq!(attr_value(attrs, "data-id"), Some("7"));
        assert_eq!(attr_value(attrs, "hidden"), Some(""));
        assert_eq!(attr_value(attrs, "style"), None);
    }
}
