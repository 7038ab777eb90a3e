use super::availability::Availability;
use super::progress::GenerationTracker;
use crate::models::ContentType;

/// Fixed display order. Every option is always shown so missing variants can be generated.
pub(crate) const TAB_ORDER: [ContentType; 5] = [
    ContentType::Original,
    ContentType::Markdown,
    ContentType::Summary,
    ContentType::KeyPoints,
    ContentType::Improved,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum TabState {
    Ready,
    Empty,
    Generating,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TabOption {
    pub content_type: ContentType,
    pub label: &'static str,
    pub state: TabState,
    pub active: bool,
}

pub(crate) fn tab_options(
    availability: &Availability,
    active: ContentType,
    tracker: &GenerationTracker,
    now_ms: i64,
) -> Vec<TabOption> {
    TAB_ORDER
        .into_iter()
        .map(|ct| {
            let generating = ct
                .enhancement()
                .is_some_and(|k| tracker.phase(k, now_ms).is_active())
                || (ct == ContentType::Summary && availability.summary_generating);

            let state = if generating {
                TabState::Generating
            } else if ct == ContentType::Summary && availability.summary_failed {
                TabState::Failed
            } else if availability.is_available(ct) {
                TabState::Ready
            } else {
                TabState::Empty
            };

            TabOption {
                content_type: ct,
                label: ct.label(),
                state,
                active: ct == active,
            }
        })
        .collect()
}

fn position(ct: ContentType) -> usize {
    TAB_ORDER.iter().position(|t| *t == ct).unwrap_or(0)
}

/// Next tab in display order, wrapping around.
pub(crate) fn next_tab(ct: ContentType) -> ContentType {
    TAB_ORDER[(position(ct) + 1) % TAB_ORDER.len()]
}

/// Previous tab in display order, wrapping around.
pub(crate) fn prev_tab(ct: ContentType) -> ContentType {
    TAB_ORDER[(position(ct) + TAB_ORDER.len() - 1) % TAB_ORDER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnhancementKind, Note};

    #[test]
    fn test_all_five_options_always_present_in_order() {
        let opts = tab_options(
            &Availability::default(),
            ContentType::Original,
            &GenerationTracker::default(),
            0,
        );
        let order: Vec<ContentType> = opts.iter().map(|o| o.content_type).collect();
        assert_eq!(order, TAB_ORDER.to_vec());
        assert_eq!(opts[0].state, TabState::Ready);
        assert!(opts[1..].iter().all(|o| o.state == TabState::Empty));
        assert!(opts[0].active);
        assert_eq!(opts.iter().filter(|o| o.active).count(), 1);
    }

    #[test]
    fn test_states_reflect_generation_and_failure() {
        let avail = Availability {
            has_key_points: true,
            summary_failed: true,
            ..Default::default()
        };
        let mut tracker = GenerationTracker::default();
        tracker.requested(EnhancementKind::ImproveClarity, &Note::default(), 0);

        let opts = tab_options(&avail, ContentType::KeyPoints, &tracker, 10);
        let state = |ct| opts.iter().find(|o| o.content_type == ct).map(|o| o.state);
        assert_eq!(state(ContentType::Summary), Some(TabState::Failed));
        assert_eq!(state(ContentType::KeyPoints), Some(TabState::Ready));
        assert_eq!(state(ContentType::Improved), Some(TabState::Generating));
        assert_eq!(state(ContentType::Markdown), Some(TabState::Empty));
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        assert_eq!(next_tab(ContentType::Original), ContentType::Markdown);
        assert_eq!(next_tab(ContentType::Improved), ContentType::Original);
        assert_eq!(prev_tab(ContentType::Original), ContentType::Improved);
        assert_eq!(prev_tab(ContentType::Summary), ContentType::Markdown);
    }
}
