use crate::api::ApiError;
use crate::components::enhance::NoteContentViewer;
use crate::components::ui::{
    Alert, AlertDescription, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card,
    CardContent, CardDescription, CardHeader, CardTitle, Spinner,
};
use crate::enhance::{Availability, GenerationTracker, ADVANCE_PRIORITY};
use crate::models::{ContentType, EnhancementKind, Note};
use crate::state::AppContext;
use crate::util::date_label;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_interval_with_handle;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;
use std::sync::Arc;
use std::time::Duration;

const NOTE_LIST_LIMIT: usize = 100;
/// How often an open note is re-fetched while an enhancement is in flight.
const POLL_INTERVAL: Duration = Duration::from_secs(3);

fn report(app: AppContext, err: &ApiError) -> String {
    if err.is_unauthorized() {
        app.0.sign_out();
        return "Your session has expired. Sign in again to see your notes.".to_string();
    }
    err.to_string()
}

#[component]
fn ErrorAlert(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <Alert class="border-destructive/30">
            <AlertDescription class="text-destructive text-xs">{message}</AlertDescription>
        </Alert>
    }
}

#[component]
fn NoteCard(note: Note) -> impl IntoView {
    let href = format!("/note/{}", urlencoding::encode(&note.id));
    let title = note.display_title().to_string();
    let updated = date_label(note.updated_at.as_deref());
    let pinned = note.is_pinned;
    let availability = Availability::from_note(&note);
    let ready: Vec<ContentType> = ADVANCE_PRIORITY
        .into_iter()
        .filter(|ct| availability.is_available(*ct))
        .collect();

    view! {
        <a href=href class="block">
            <Card class="h-full gap-3 py-4 transition-colors hover:bg-accent/40">
                <CardHeader class="px-4">
                    <div class="flex w-full items-center justify-between gap-2">
                        <CardTitle class="truncate text-sm">{title}</CardTitle>
                        <Show when=move || pinned fallback=|| ().into_view()>
                            <Badge variant=BadgeVariant::Outline>"Pinned"</Badge>
                        </Show>
                    </div>
                    <CardDescription class="text-xs">
                        {updated.map(|d| format!("Updated {d}")).unwrap_or_default()}
                    </CardDescription>
                </CardHeader>
                <CardContent class="flex flex-wrap gap-1 px-4">
                    {note
                        .tags
                        .into_iter()
                        .map(|tag| view! { <Badge>{format!("#{tag}")}</Badge> })
                        .collect_view()}
                    {ready
                        .into_iter()
                        .map(|ct| view! { <Badge variant=BadgeVariant::Highlight>{ct.label()}</Badge> })
                        .collect_view()}
                </CardContent>
            </Card>
        </a>
    }
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notes: RwSignal<Vec<Note>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let signed_in = move || app_state.0.api_client.with(|c| c.is_authenticated());

    let api_client = app_state.0.api_client.get_untracked();
    spawn_local(async move {
        match api_client.list_notes(NOTE_LIST_LIMIT).await {
            Ok(list) => notes.set(list),
            Err(e) => error.set(Some(report(app_state, &e))),
        }
        loading.set(false);
    });

    view! {
        <div class="space-y-4">
            <h1 class="text-xl font-semibold">"Notes"</h1>
            <Show when=move || !signed_in() fallback=|| ().into_view()>
                <div class="text-xs text-muted-foreground">
                    "Not signed in. Only notes visible to guests are listed."
                </div>
            </Show>

            <Show when=move || loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Loading notes..."
                </div>
            </Show>

            {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}

            <Show
                when=move || !loading.get() && error.get().is_none() && notes.with(|n| n.is_empty())
                fallback=|| ().into_view()
            >
                <div class="text-sm text-muted-foreground">"No notes yet."</div>
            </Show>

            <div class="grid gap-3 sm:grid-cols-2">
                <For
                    each=move || notes.get()
                    key=|n| (n.id.clone(), n.updated_at.clone())
                    children=|note| view! { <NoteCard note=note /> }
                />
            </div>
        </div>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NoteRouteParams {
    pub note_id: Option<String>,
}

#[component]
pub fn NotePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<NoteRouteParams>();

    // Use closures so params access happens inside a reactive tracking context.
    let note_id = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.note_id)
            .unwrap_or_default()
    };

    let note: RwSignal<Option<Note>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    // Non-fatal messages from enhancement requests and saves.
    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let tracker: RwSignal<GenerationTracker> = RwSignal::new(GenerationTracker::default());
    let active_type: RwSignal<ContentType> = RwSignal::new(ContentType::Original);

    let editing: RwSignal<bool> = RwSignal::new(false);
    let draft: RwSignal<String> = RwSignal::new(String::new());
    let saving: RwSignal<bool> = RwSignal::new(false);

    // Ignore responses for a note we have already navigated away from.
    let request_id: RwSignal<u64> = RwSignal::new(0);

    let fetch = move |id: String, quiet: bool| {
        let req = request_id.get_untracked() + 1;
        request_id.set(req);
        if !quiet {
            loading.set(true);
            error.set(None);
        }

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_note(&id).await;
            if request_id.get_untracked() != req {
                return;
            }
            match result {
                Ok(n) => note.set(Some(n)),
                Err(e) if quiet => tracing::warn!(note_id = %id, error = %e, "note refresh failed"),
                Err(e) => error.set(Some(report(app_state, &e))),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        let id = note_id();
        note.set(None);
        editing.set(false);
        notice.set(None);
        tracker.update(|t| t.clear());
        if id.trim().is_empty() {
            error.set(Some("No note selected.".to_string()));
            return;
        }
        fetch(id, false);
    });

    match set_interval_with_handle(
        move || {
            if !tracker.with_untracked(|t| t.is_busy()) || editing.get_untracked() {
                return;
            }
            if let Some(id) = note.with_untracked(|n| n.as_ref().map(|n| n.id.clone())) {
                fetch(id, true);
            }
        },
        POLL_INTERVAL,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => tracing::warn!(error = ?e, "could not start note polling"),
    }

    let on_enhance = Callback::new(move |kind: EnhancementKind| {
        let Some(id) = note.with_untracked(|n| n.as_ref().map(|n| n.id.clone())) else {
            return;
        };
        notice.set(None);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.enhance_note(&id, kind).await {
                Ok(()) => {
                    tracing::info!(note_id = %id, %kind, "enhancement requested");
                    fetch(id, true);
                }
                Err(e) => {
                    tracker.update(|t| {
                        t.cancel(kind);
                    });
                    notice.set(Some(format!("Could not start {kind}: {}", report(app_state, &e))));
                }
            }
        });
    });

    let on_cancel = Callback::new(move |_: ()| {
        notice.set(Some(
            "Stopped waiting. The result will still show up here if it finishes.".to_string(),
        ));
    });

    let on_active_change = Callback::new(move |ct: ContentType| {
        tracing::debug!(%ct, "active content type");
        active_type.set(ct);
    });

    let start_editing = move |_: web_sys::MouseEvent| {
        let text = note.with_untracked(|n| {
            n.as_ref()
                .map(|n| n.original_text().to_string())
                .unwrap_or_default()
        });
        draft.set(text);
        editing.set(true);
    };

    let save = move |_: web_sys::MouseEvent| {
        let Some(id) = note.with_untracked(|n| n.as_ref().map(|n| n.id.clone())) else {
            return;
        };
        let content = draft.get_untracked();
        saving.set(true);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.update_note_content(&id, &content).await {
                Ok(updated) => {
                    note.set(Some(updated));
                    editing.set(false);
                }
                Err(e) => notice.set(Some(format!("Could not save: {}", report(app_state, &e)))),
            }
            saving.set(false);
        });
    };

    let editor: ChildrenFn = Arc::new(move || {
        view! {
            <div class="flex flex-col gap-2">
                <textarea
                    class="min-h-80 w-full rounded-md border bg-background p-3 font-mono text-sm outline-none focus-visible:ring-[3px] focus-visible:ring-ring/50"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    disabled=move || saving.get()
                />
                <div class="flex items-center gap-2">
                    <Button size=ButtonSize::Sm on:click=save attr:disabled=move || saving.get()>
                        <Show when=move || saving.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| editing.set(false)
                    >
                        "Cancel"
                    </Button>
                </div>
            </div>
        }
        .into_any()
    });

    let note_signal = Signal::derive(move || note.get().unwrap_or_default());
    let prefs = app_state.0.view_prefs;

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between gap-2">
                <a href="/" class="text-xs text-muted-foreground hover:text-foreground">"← All notes"</a>
                <Show when=move || note.with(|n| n.is_some()) && !editing.get() fallback=|| ().into_view()>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=start_editing>
                        "Edit"
                    </Button>
                </Show>
            </div>

            <Show when=move || loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Loading note..."
                </div>
            </Show>

            {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}
            {move || notice.get().map(|n| view! {
                <Alert>
                    <AlertDescription class="text-xs">{n}</AlertDescription>
                </Alert>
            })}

            <Show when=move || note.with(|n| n.is_some()) fallback=|| ().into_view()>
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold">
                        {move || note.with(|n| n.as_ref().map(|n| n.display_title().to_string()))}
                    </h1>
                    <div class="text-xs text-muted-foreground">
                        {move || {
                            let updated = note.with(|n| {
                                n.as_ref().and_then(|n| date_label(n.updated_at.as_deref()))
                            });
                            let viewing = active_type.get().label();
                            match updated {
                                Some(d) => format!("Updated {d} · Viewing {viewing}"),
                                None => format!("Viewing {viewing}"),
                            }
                        }}
                    </div>
                </div>

                <NoteContentViewer
                    note=note_signal
                    tracker=tracker
                    prefs=prefs
                    on_enhance=on_enhance
                    editing=editing
                    on_cancel=on_cancel
                    on_active_change=on_active_change
                    editor=editor.clone()
                />
            </Show>
        </div>
    }
}
