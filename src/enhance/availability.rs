use crate::models::{ContentType, Note, SummaryStatus};

/// Summary, key points and markdown must be longer than this (trimmed, in chars).
pub(crate) const MIN_VARIANT_CHARS: usize = 10;
/// Improved content needs more to count as a rewrite rather than a placeholder.
pub(crate) const MIN_IMPROVED_CHARS: usize = 20;

/// Order in which auto-advance prefers newly available variants.
pub(crate) const ADVANCE_PRIORITY: [ContentType; 4] = [
    ContentType::Improved,
    ContentType::KeyPoints,
    ContentType::Summary,
    ContentType::Markdown,
];

/// Which variants of a note have usable content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Availability {
    pub has_summary: bool,
    pub has_key_points: bool,
    pub has_markdown: bool,
    pub has_improved_clarity: bool,
    pub summary_generating: bool,
    pub summary_failed: bool,
}

fn meaningful(content: Option<&str>, min_chars: usize) -> bool {
    content
        .map(|c| c.trim().chars().count() > min_chars)
        .unwrap_or(false)
}

fn stamped(ts: Option<&str>) -> bool {
    ts.map(|t| !t.trim().is_empty()).unwrap_or(false)
}

impl Availability {
    pub fn from_note(note: &Note) -> Self {
        let summary_status = note.summary_status;
        Self {
            has_summary: meaningful(note.summary.as_deref(), MIN_VARIANT_CHARS),
            has_key_points: meaningful(note.key_points.as_deref(), MIN_VARIANT_CHARS)
                && stamped(note.key_points_generated_at.as_deref()),
            has_markdown: meaningful(note.markdown_content.as_deref(), MIN_VARIANT_CHARS)
                && stamped(note.markdown_content_generated_at.as_deref()),
            has_improved_clarity: meaningful(note.improved_content.as_deref(), MIN_IMPROVED_CHARS)
                && stamped(note.improved_content_generated_at.as_deref()),
            summary_generating: matches!(
                summary_status,
                Some(SummaryStatus::Generating) | Some(SummaryStatus::Pending)
            ),
            summary_failed: summary_status == Some(SummaryStatus::Failed),
        }
    }

    pub fn is_available(&self, ct: ContentType) -> bool {
        match ct {
            ContentType::Original => true,
            ContentType::Summary => self.has_summary,
            ContentType::KeyPoints => self.has_key_points,
            ContentType::Markdown => self.has_markdown,
            ContentType::Improved => self.has_improved_clarity,
        }
    }

    /// Highest-priority enhancement with content, if any.
    pub fn best_enhancement(&self) -> Option<ContentType> {
        ADVANCE_PRIORITY
            .into_iter()
            .find(|ct| self.is_available(*ct))
    }
}
