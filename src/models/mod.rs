use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Generation status reported by the backend for the summary variant.
///
/// Only the summary carries an explicit status; the other variants are inferred from
/// content + timestamp presence.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SummaryStatus {
    Completed,
    Generating,
    Pending,
    Failed,
}

/// Which rendering of a note is shown.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub(crate) enum ContentType {
    #[default]
    Original,
    Summary,
    KeyPoints,
    Markdown,
    Improved,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Original => "Original",
            ContentType::Summary => "Summary",
            ContentType::KeyPoints => "Key points",
            ContentType::Markdown => "Markdown",
            ContentType::Improved => "Improved",
        }
    }

    /// The enrichment operation that produces this variant. `Original` has none.
    pub fn enhancement(self) -> Option<EnhancementKind> {
        match self {
            ContentType::Original => None,
            ContentType::Summary => Some(EnhancementKind::Summarize),
            ContentType::KeyPoints => Some(EnhancementKind::ExtractKeyPoints),
            ContentType::Markdown => Some(EnhancementKind::ConvertToMarkdown),
            ContentType::Improved => Some(EnhancementKind::ImproveClarity),
        }
    }
}

/// Enrichment operation identifier, as sent to the backend function.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum EnhancementKind {
    Summarize,
    ExtractKeyPoints,
    ImproveClarity,
    ConvertToMarkdown,
}

impl EnhancementKind {
    pub fn content_type(self) -> ContentType {
        match self {
            EnhancementKind::Summarize => ContentType::Summary,
            EnhancementKind::ExtractKeyPoints => ContentType::KeyPoints,
            EnhancementKind::ImproveClarity => ContentType::Improved,
            EnhancementKind::ConvertToMarkdown => ContentType::Markdown,
        }
    }
}

/// Note record as stored by the backend.
///
/// Only the fields the viewer reads are modelled; unknown columns are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct Note {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_points: Option<String>,
    #[serde(default)]
    pub markdown_content: Option<String>,
    #[serde(default)]
    pub improved_content: Option<String>,

    #[serde(default)]
    pub summary_generated_at: Option<String>,
    #[serde(default)]
    pub key_points_generated_at: Option<String>,
    #[serde(default)]
    pub markdown_content_generated_at: Option<String>,
    #[serde(default)]
    pub improved_content_generated_at: Option<String>,

    #[serde(default)]
    pub summary_status: Option<SummaryStatus>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Note {
    /// Author-entered text: `content`, falling back to `description`.
    pub fn original_text(&self) -> &str {
        match self.content.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => self.description.as_deref().unwrap_or(""),
        }
    }

    pub fn variant_text(&self, ct: ContentType) -> Option<&str> {
        match ct {
            ContentType::Original => Some(self.original_text()),
            ContentType::Summary => self.summary.as_deref(),
            ContentType::KeyPoints => self.key_points.as_deref(),
            ContentType::Markdown => self.markdown_content.as_deref(),
            ContentType::Improved => self.improved_content.as_deref(),
        }
    }

    pub fn generated_at(&self, ct: ContentType) -> Option<&str> {
        match ct {
            ContentType::Original => None,
            ContentType::Summary => self.summary_generated_at.as_deref(),
            ContentType::KeyPoints => self.key_points_generated_at.as_deref(),
            ContentType::Markdown => self.markdown_content_generated_at.as_deref(),
            ContentType::Improved => self.improved_content_generated_at.as_deref(),
        }
    }

    pub fn display_title(&self) -> &str {
        let t = self.title.trim();
        if t.is_empty() {
            "Untitled"
        } else {
            t
        }
    }
}
