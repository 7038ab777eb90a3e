use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+|\S+").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DiffKind {
    Added,
    Removed,
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Whitespace runs are tokens too, so reflowed spacing shows up as a change instead of
/// silently merging words.
fn tokenize(s: &str) -> Vec<&str> {
    TOKEN.find_iter(s).map(|m| m.as_str()).collect()
}

/// Word-level diff between an original text and a corrected one.
///
/// Greedy two-cursor walk, not a minimal edit script. On a mismatch it looks ahead for the
/// original's current token in the fixed text and for the fixed token in the original; the nearer
/// match decides which side gets consumed, ties consume the original side as `Removed`. When
/// neither token reappears both are replaced. Changes between two unchanged tokens are grouped as
/// one removed run followed by one added run.
///
/// If either side is empty the other is returned as a single unchanged segment.
pub(crate) fn word_diff(original: &str, fixed: &str) -> Vec<DiffSegment> {
    if original.is_empty() && fixed.is_empty() {
        return Vec::new();
    }
    if original.is_empty() {
        return vec![DiffSegment::new(DiffKind::Unchanged, fixed)];
    }
    if fixed.is_empty() {
        return vec![DiffSegment::new(DiffKind::Unchanged, original)];
    }

    let a = tokenize(original);
    let b = tokenize(fixed);
    let mut out = DiffBuilder::default();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            out.unchanged(a[i]);
            i += 1;
            j += 1;
            continue;
        }

        // Distance to the next occurrence of the original's token in the fixed text, and of the
        // fixed token in the original.
        let orig_in_fixed = b[j + 1..].iter().position(|t| *t == a[i]);
        let fixed_in_orig = a[i + 1..].iter().position(|t| *t == b[j]);

        match (orig_in_fixed, fixed_in_orig) {
            (None, None) => {
                out.removed(a[i]);
                out.added(b[j]);
                i += 1;
                j += 1;
            }
            (Some(da), Some(db)) if da < db => {
                out.added(b[j]);
                j += 1;
            }
            (Some(_), None) => {
                out.added(b[j]);
                j += 1;
            }
            _ => {
                out.removed(a[i]);
                i += 1;
            }
        }
    }

    for t in &a[i..] {
        out.removed(t);
    }
    for t in &b[j..] {
        out.added(t);
    }

    out.finish()
}

#[derive(Default)]
struct DiffBuilder {
    segments: Vec<DiffSegment>,
    removed: String,
    added: String,
}

impl DiffBuilder {
    fn unchanged(&mut self, t: &str) {
        self.flush_changes();
        match self.segments.last_mut() {
            Some(last) if last.kind == DiffKind::Unchanged => last.text.push_str(t),
            _ => self.segments.push(DiffSegment::new(DiffKind::Unchanged, t)),
        }
    }

    fn removed(&mut self, t: &str) {
        self.removed.push_str(t);
    }

    fn added(&mut self, t: &str) {
        self.added.push_str(t);
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            let text = std::mem::take(&mut self.removed);
            self.segments.push(DiffSegment::new(DiffKind::Removed, text));
        }
        if !self.added.is_empty() {
            let text = std::mem::take(&mut self.added);
            self.segments.push(DiffSegment::new(DiffKind::Added, text));
        }
    }

    fn finish(mut self) -> Vec<DiffSegment> {
        self.flush_changes();
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(kind: DiffKind, text: &str) -> DiffSegment {
        DiffSegment::new(kind, text)
    }

    #[test]
    fn test_identical_texts_are_unchanged() {
        let s = "The  quick\nbrown fox.";
        let d = word_diff(s, s);
        assert!(d.iter().all(|x| x.kind == DiffKind::Unchanged));
        let joined: String = d.iter().map(|x| x.text.as_str()).collect();
        assert_eq!(joined, s);
    }

    #[test]
    fn test_disjoint_texts_are_one_removal_then_one_addition() {
        let d = word_diff("alpha beta", "gamma\tdelta");
        assert_eq!(
            d,
            vec![
                seg(DiffKind::Removed, "alpha beta"),
                seg(DiffKind::Added, "gamma\tdelta"),
            ]
        );
    }

    #[test]
    fn test_spelling_fix() {
        let d = word_diff("I recieve mail", "I receive mail");
        assert_eq!(
            d,
            vec![
                seg(DiffKind::Unchanged, "I "),
                seg(DiffKind::Removed, "recieve"),
                seg(DiffKind::Added, "receive"),
                seg(DiffKind::Unchanged, " mail"),
            ]
        );
    }

    #[test]
    fn test_insertion_is_added_only() {
        let d = word_diff("a c", "a b c");
        assert_eq!(
            d,
            vec![
                seg(DiffKind::Unchanged, "a "),
                seg(DiffKind::Added, "b "),
                seg(DiffKind::Unchanged, "c"),
            ]
        );
    }

    #[test]
    fn test_deletion_is_removed_only() {
        let d = word_diff("a b c", "a c");
        assert_eq!(
            d,
            vec![
                seg(DiffKind::Unchanged, "a "),
                seg(DiffKind::Removed, "b "),
                seg(DiffKind::Unchanged, "c"),
            ]
        );
    }

    #[test]
    fn test_empty_side_renders_plain() {
        assert_eq!(
            word_diff("", "new text"),
            vec![seg(DiffKind::Unchanged, "new text")]
        );
        assert_eq!(word_diff("old", ""), vec![seg(DiffKind::Unchanged, "old")]);
        assert!(word_diff("", "").is_empty());
    }
}
