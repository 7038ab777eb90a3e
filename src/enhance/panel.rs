use super::availability::Availability;
use super::progress::{GenerationPhase, GenerationTracker};
use crate::content::{
    has_enhancement_markers, normalize, parse_blocks, sanitize_rich_text,
    strip_enhancement_markers, to_highlight_delimiters, word_diff, Block, DiffSegment,
    NormalizedContent,
};
use crate::models::{ContentType, EnhancementKind, Note};

/// Normalized markdown plus its parsed block model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Rendered {
    pub content: NormalizedContent,
    pub blocks: Vec<Block>,
}

impl Rendered {
    fn from_raw(raw: &str) -> Self {
        let content = normalize(Some(raw));
        let blocks = parse_blocks(&content.markdown);
        Self { content, blocks }
    }
}

/// What the display panel shows for the active content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PanelView {
    /// Sanitized rich-text HTML of the author's text (may be empty).
    Original { html: String },
    Generating { kind: EnhancementKind, progress: u8 },
    /// Generating for longer than the patience window.
    Stuck { kind: EnhancementKind },
    /// Only reachable for the summary, the one variant with a failure status.
    Failed { kind: EnhancementKind },
    /// No usable content yet; offers to generate it.
    Empty { kind: EnhancementKind },
    Enhanced(Rendered),
    /// Improved content with AI-added spans highlighted.
    Highlighted(Rendered),
    /// Improved content written before markers existed; offers regeneration.
    Legacy(Rendered),
}

impl PanelView {
    /// The variant the panel's generate, retry or regenerate button asks for, if it has one.
    pub fn generate_kind(&self) -> Option<EnhancementKind> {
        match self {
            PanelView::Stuck { kind } | PanelView::Failed { kind } | PanelView::Empty { kind } => {
                Some(*kind)
            }
            PanelView::Legacy(_) => Some(EnhancementKind::ImproveClarity),
            PanelView::Original { .. }
            | PanelView::Generating { .. }
            | PanelView::Enhanced(_)
            | PanelView::Highlighted(_) => None,
        }
    }
}

pub(crate) fn resolve_panel(
    note: &Note,
    availability: &Availability,
    active: ContentType,
    tracker: &GenerationTracker,
    now_ms: i64,
) -> PanelView {
    let Some(kind) = active.enhancement() else {
        return PanelView::Original {
            html: sanitize_rich_text(note.original_text()),
        };
    };

    match tracker.phase(kind, now_ms) {
        GenerationPhase::Stuck => return PanelView::Stuck { kind },
        GenerationPhase::Running { progress } => {
            return PanelView::Generating { kind, progress }
        }
        GenerationPhase::Idle => {}
    }

    if active == ContentType::Summary {
        if availability.summary_generating {
            return PanelView::Generating { kind, progress: 0 };
        }
        if availability.summary_failed {
            return PanelView::Failed { kind };
        }
    }

    let raw = note.variant_text(active).unwrap_or_default();

    // Pre-marker rewrites can be shorter than the availability floor; they still need the
    // regenerate prompt rather than the empty state.
    if active == ContentType::Improved && is_legacy_improved(note) {
        return PanelView::Legacy(Rendered::from_raw(raw));
    }

    if !availability.is_available(active) {
        return PanelView::Empty { kind };
    }

    if active == ContentType::Improved {
        return PanelView::Highlighted(Rendered::from_raw(&to_highlight_delimiters(raw)));
    }
    PanelView::Enhanced(Rendered::from_raw(raw))
}

/// Improved content that is stamped and non-blank but predates enhancement markers.
pub(crate) fn is_legacy_improved(note: &Note) -> bool {
    let stamped = note
        .improved_content_generated_at
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());
    match note.improved_content.as_deref() {
        Some(raw) if stamped && !raw.trim().is_empty() => !has_enhancement_markers(raw),
        _ => false,
    }
}

/// Word diff between the original text and the improved variant, both normalized and free of
/// markers.
pub(crate) fn improved_diff(note: &Note) -> Vec<DiffSegment> {
    let original = normalize(Some(&strip_enhancement_markers(note.original_text())));
    let improved = note
        .improved_content
        .as_deref()
        .map(strip_enhancement_markers)
        .unwrap_or_default();
    let improved = normalize(Some(&improved));
    word_diff(&original.markdown, &improved.markdown)
}

/// Headline and detail copy shown while a variant is being generated.
pub(crate) fn generating_copy(kind: EnhancementKind) -> (&'static str, &'static str) {
    match kind {
        EnhancementKind::Summarize => ("Summarizing your note", "Condensing the main ideas..."),
        EnhancementKind::ExtractKeyPoints => {
            ("Extracting key points", "Pulling out the facts worth remembering...")
        }
        EnhancementKind::ImproveClarity => {
            ("Improving clarity", "Rewriting for readability and flow...")
        }
        EnhancementKind::ConvertToMarkdown => {
            ("Formatting as markdown", "Adding headings, lists and structure...")
        }
    }
}

/// Call-to-action label for generating a missing variant.
pub(crate) fn generate_label(kind: EnhancementKind) -> &'static str {
    match kind {
        EnhancementKind::Summarize => "Generate summary",
        EnhancementKind::ExtractKeyPoints => "Extract key points",
        EnhancementKind::ImproveClarity => "Improve clarity",
        EnhancementKind::ConvertToMarkdown => "Convert to markdown",
    }
}
