//! Text processing for note content: markup normalization, rendering model, sanitizing and
//! word diffs. Pure functions, no browser access.

pub(crate) mod diff;
pub(crate) mod html;
pub(crate) mod markers;
pub(crate) mod normalize;
pub(crate) mod render;
pub(crate) mod sanitize;

pub(crate) use diff::{word_diff, DiffKind, DiffSegment};
pub(crate) use markers::{
    has_enhancement_markers, strip_enhancement_markers, to_highlight_delimiters,
};
pub(crate) use normalize::{normalize, NormalizedContent};
pub(crate) use render::{parse_blocks, Block, Inline};
pub(crate) use sanitize::sanitize_rich_text;
