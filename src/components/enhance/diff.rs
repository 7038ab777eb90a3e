use crate::components::ui::{Badge, BadgeVariant};
use crate::content::{DiffKind, DiffSegment};
use leptos::prelude::*;

fn count_words(segments: &[DiffSegment], kind: DiffKind) -> usize {
    segments
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.text.split_whitespace().count())
        .sum()
}

/// Inline word diff: removed words struck through, added words highlighted.
#[component]
pub(crate) fn DiffView(segments: Vec<DiffSegment>) -> impl IntoView {
    let added = count_words(&segments, DiffKind::Added);
    let removed = count_words(&segments, DiffKind::Removed);

    let body = segments
        .into_iter()
        .map(|seg| match seg.kind {
            DiffKind::Unchanged => view! { <span>{seg.text}</span> }.into_any(),
            DiffKind::Added => view! {
                <ins class="rounded bg-emerald-500/15 px-0.5 text-emerald-800 no-underline dark:text-emerald-300">
                    {seg.text}
                </ins>
            }
            .into_any(),
            DiffKind::Removed => view! {
                <del class="rounded bg-red-500/10 px-0.5 text-red-700 line-through dark:text-red-300">
                    {seg.text}
                </del>
            }
            .into_any(),
        })
        .collect_view();

    view! {
        <div class="space-y-3" data-name="DiffView">
            <div class="flex items-center gap-2">
                <Badge variant=BadgeVariant::Outline>{format!("+{added} words")}</Badge>
                <Badge variant=BadgeVariant::Outline>{format!("-{removed} words")}</Badge>
            </div>
            <div class="whitespace-pre-wrap leading-relaxed">{body}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::word_diff;

    #[test]
    fn test_count_words_by_kind() {
        let segs = word_diff("teh quick fox", "the quick brown fox");
        assert_eq!(count_words(&segs, DiffKind::Removed), 1);
        assert_eq!(count_words(&segs, DiffKind::Added), 2);
    }
}
