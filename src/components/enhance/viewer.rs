use super::panel::DisplayPanel;
use super::prefs::ViewPreferencesBar;
use super::tabs::EnhancementTabs;
use crate::config::{ViewMode, ViewPreferences};
use crate::content::sanitize_rich_text;
use crate::enhance::{
    improved_diff, resolve_panel, tab_options, AdvanceEvent, AutoAdvanceController, Availability,
    GenerationTracker, PanelView,
};
use crate::models::{ContentType, EnhancementKind, Note};
use crate::util::{browser_clock, SharedClock};
use leptos::prelude::*;
use leptos_dom::helpers::set_interval_with_handle;
use std::sync::Arc;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

/// Tabs plus display panel for one note.
///
/// Owns the auto-advance controller. The generation tracker is shared with the host so it can
/// poll while jobs are in flight. A one-second tick drives progress, stuck detection and the
/// expiry of the manual-selection cooldown.
#[component]
pub(crate) fn NoteContentViewer(
    #[prop(into)] note: Signal<Note>,
    tracker: RwSignal<GenerationTracker>,
    #[prop(into)] prefs: Signal<ViewPreferences>,
    /// Enrichment trigger, called with the variant to (re)generate.
    on_enhance: Callback<EnhancementKind>,
    #[prop(into, optional)] editing: Signal<bool>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    #[prop(optional)] on_active_change: Option<Callback<ContentType>>,
    #[prop(optional)] on_advance_event: Option<Callback<AdvanceEvent>>,
    #[prop(optional)] clock: Option<SharedClock>,
    /// Shown in place of the panel while editing.
    #[prop(optional)]
    editor: Option<ChildrenFn>,
) -> impl IntoView {
    let clock = clock.unwrap_or_else(browser_clock);
    let tick = RwSignal::new(clock.now_ms());
    let clock = StoredValue::new(clock);
    let now_ms = move || clock.with_value(|c| c.now_ms());

    let mut ctl = AutoAdvanceController::new(
        prefs.get_untracked().view_mode.cooldown_ms(),
        clock.get_value(),
    );
    if let Some(cb) = on_advance_event {
        ctl = ctl.with_events(Arc::new(move |e: &AdvanceEvent| cb.run(e.clone())));
    }
    let controller = StoredValue::new(ctl);

    let active = RwSignal::new(ContentType::Original);
    let show_diff = RwSignal::new(false);

    let sync_active = move || {
        let current = controller.with_value(|c| c.active());
        if active.get_untracked() != current {
            active.set(current);
        }
    };

    match set_interval_with_handle(move || tick.set(now_ms()), TICK) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => tracing::warn!(error = ?e, "could not start viewer tick"),
    }

    Effect::new(move |_| {
        let cooldown = prefs.get().view_mode.cooldown_ms();
        controller.update_value(|c| c.set_cooldown_ms(cooldown));
    });

    Effect::new(move |_| {
        let is_editing = editing.get();
        controller.update_value(|c| c.set_editing(is_editing));
        sync_active();
    });

    // Note identity and availability: reset on a new id, then let new variants auto-advance.
    Effect::new(move |_| {
        let now = now_ms();
        note.with(|n| {
            tracker.update(|t| t.sync(n, now));
            let availability = Availability::from_note(n);
            controller.update_value(|c| {
                if c.set_note(&n.id) {
                    show_diff.set(false);
                }
                c.observe(&availability);
            });
        });
        sync_active();
    });

    Effect::new(move |prev: Option<ContentType>| {
        let current = active.get();
        if prev != Some(current) {
            if let Some(cb) = on_active_change {
                cb.run(current);
            }
        }
        current
    });

    let availability = Memo::new(move |_| note.with(Availability::from_note));

    let options = Memo::new(move |_| {
        let now = tick.get();
        let act = active.get();
        let avail = availability.get();
        tracker.with(|t| tab_options(&avail, act, t, now))
    });

    let panel_view = Memo::new(move |_| {
        let now = tick.get();
        let act = active.get();
        let avail = availability.get();
        note.with(|n| tracker.with(|t| resolve_panel(n, &avail, act, t, now)))
    });

    let original_view = Memo::new(move |_| PanelView::Original {
        html: note.with(|n| sanitize_rich_text(n.original_text())),
    });

    let diff = Signal::derive(move || show_diff.get().then(|| note.with(improved_diff)));

    let select = Callback::new(move |ct: ContentType| {
        controller.update_value(|c| c.select(ct));
        sync_active();
    });

    let generate = Callback::new(move |kind: EnhancementKind| {
        let now = now_ms();
        note.with_untracked(|n| tracker.update(|t| t.requested(kind, n, now)));
        tick.set(now);
        on_enhance.run(kind);
    });

    let cancel = Callback::new(move |kind: EnhancementKind| {
        tracker.update(|t| {
            t.cancel(kind);
        });
        if let Some(cb) = on_cancel {
            cb.run(());
        }
    });

    let toggle_diff = Callback::new(move |_: ()| show_diff.update(|v| *v = !*v));

    let two_column = move || prefs.get().view_mode == ViewMode::TwoColumn;

    let body = move || {
        if editing.get() {
            return editor.as_ref().map(|e| e()).into_any();
        }

        let main = view! {
            <DisplayPanel
                view=panel_view
                prefs=prefs
                on_generate=generate
                on_cancel=cancel
                diff=diff
                on_toggle_diff=toggle_diff
            />
        };

        if two_column() {
            view! {
                <div class="grid gap-6 md:grid-cols-2">
                    <div class="md:border-r md:pr-6">
                        <div class="mb-2 text-xs font-medium uppercase tracking-wide text-muted-foreground">
                            "Original"
                        </div>
                        <DisplayPanel
                            view=original_view
                            prefs=prefs
                            on_generate=generate
                            on_cancel=cancel
                            diff=Signal::stored(None)
                            on_toggle_diff=toggle_diff
                        />
                    </div>
                    <div>{main}</div>
                </div>
            }
            .into_any()
        } else {
            main.into_any()
        }
    };

    view! {
        <div class="flex flex-col gap-4" data-name="NoteContentViewer">
            <div class="flex flex-wrap items-center justify-between gap-2">
                <EnhancementTabs options=options on_select=select disabled=editing />
                <ViewPreferencesBar />
            </div>
            {body}
        </div>
    }
}
