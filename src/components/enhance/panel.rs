use super::diff::DiffView;
use super::markdown::MarkdownView;
use super::tabs::PANEL_DOM_ID;
use crate::components::ui::{
    Alert, AlertActions, AlertDescription, AlertTitle, Badge, BadgeVariant, Button, ButtonSize,
    ButtonVariant, Progress, Spinner,
};
use crate::config::ViewPreferences;
use crate::content::DiffSegment;
use crate::enhance::{generate_label, generating_copy, PanelView, Rendered};
use crate::models::EnhancementKind;
use icons::{Clock, FileText, Hash, ListChecks, RefreshCw, Sparkles, X};
use leptos::prelude::*;
use tw_merge::tw_merge;

fn kind_icon(kind: EnhancementKind) -> AnyView {
    match kind {
        EnhancementKind::Summarize => view! { <FileText class="size-5" /> }.into_any(),
        EnhancementKind::ExtractKeyPoints => view! { <ListChecks class="size-5" /> }.into_any(),
        EnhancementKind::ImproveClarity => view! { <Sparkles class="size-5" /> }.into_any(),
        EnhancementKind::ConvertToMarkdown => view! { <Hash class="size-5" /> }.into_any(),
    }
}

#[component]
fn GeneratingState(kind: EnhancementKind, progress: u8) -> impl IntoView {
    let (title, detail) = generating_copy(kind);

    view! {
        <div class="flex flex-col items-center gap-3 py-10 text-center" aria-live="polite">
            <div class="relative flex size-12 items-center justify-center rounded-full bg-primary/10 text-primary">
                {kind_icon(kind)}
                <Spinner class="absolute -right-1 -bottom-1 size-4" label=title />
            </div>
            <div class="space-y-1">
                <div class="text-sm font-medium">{title}</div>
                <div class="text-xs text-muted-foreground">{detail}</div>
            </div>
            <Progress value=Signal::stored(progress) class="max-w-xs" />
        </div>
    }
}

#[component]
fn EmptyState(kind: EnhancementKind, on_generate: Callback<EnhancementKind>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 rounded-lg border border-dashed py-10 text-center">
            <div class="text-muted-foreground">{kind_icon(kind)}</div>
            <div class="text-sm text-muted-foreground">"This version hasn't been generated yet."</div>
            <Button size=ButtonSize::Sm on:click=move |_| on_generate.run(kind)>
                <Sparkles />
                {generate_label(kind)}
            </Button>
        </div>
    }
}

fn rendered_body(rendered: Rendered) -> AnyView {
    if rendered.content.is_plain_text() {
        view! { <div class="whitespace-pre-wrap leading-relaxed">{rendered.content.markdown}</div> }
            .into_any()
    } else {
        view! { <MarkdownView blocks=rendered.blocks /> }.into_any()
    }
}

fn word_count_footer(rendered: &Rendered) -> impl IntoView {
    let words = rendered.content.meta.word_count;
    view! { <div class="mt-4 text-xs text-muted-foreground">{format!("{words} words")}</div> }
}

/// Renders whatever [`PanelView`] the viewer resolved. Generation, retry and cancel are reported
/// through callbacks; the panel never talks to the backend itself.
#[component]
pub(crate) fn DisplayPanel(
    #[prop(into)] view: Signal<PanelView>,
    #[prop(into)] prefs: Signal<ViewPreferences>,
    on_generate: Callback<EnhancementKind>,
    on_cancel: Callback<EnhancementKind>,
    /// Word diff for the improved version; `None` while the comparison is hidden.
    #[prop(into)]
    diff: Signal<Option<Vec<DiffSegment>>>,
    on_toggle_diff: Callback<()>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let wrapper_class = move || {
        let p = prefs.get();
        tw_merge!(
            "min-h-40",
            p.font_size.class(),
            p.text_align.class(),
            class.clone()
        )
    };

    let generate = move || {
        if let Some(kind) = view.with_untracked(|v| v.generate_kind()) {
            on_generate.run(kind);
        }
    };

    let body = move || match view.get() {
        PanelView::Original { html } => {
            if html.trim().is_empty() {
                view! {
                    <div class="py-10 text-center text-sm text-muted-foreground">
                        "This note has no content yet."
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div
                        class="space-y-3 leading-relaxed [&_ul]:list-disc [&_ol]:list-decimal [&_ul]:pl-6 [&_ol]:pl-6 [&_h1]:text-2xl [&_h2]:text-xl [&_h3]:text-lg [&_blockquote]:border-l-4 [&_blockquote]:pl-4"
                        inner_html=html
                    />
                }
                .into_any()
            }
        }
        PanelView::Generating { kind, progress } => view! {
            <div class="flex flex-col items-center">
                <GeneratingState kind=kind progress=progress />
                <Button variant=ButtonVariant::Ghost size=ButtonSize::Xs on:click=move |_| on_cancel.run(kind)>
                    "Cancel"
                </Button>
            </div>
        }
        .into_any(),
        PanelView::Stuck { kind } => view! {
            <Alert class="border-amber-400/40">
                <Clock class="size-4" />
                <div>
                    <AlertTitle>"Taking longer than expected"</AlertTitle>
                    <AlertDescription>
                        "The enhancement is still running. You can keep waiting, try again or stop tracking it."
                    </AlertDescription>
                    <AlertActions>
                        <Button size=ButtonSize::Xs on:click=move |_| generate()>
                            <RefreshCw />
                            "Retry"
                        </Button>
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Xs on:click=move |_| on_cancel.run(kind)>
                            "Cancel"
                        </Button>
                    </AlertActions>
                </div>
            </Alert>
        }
        .into_any(),
        PanelView::Failed { .. } => view! {
            <Alert class="border-destructive/30">
                <X class="size-4 text-destructive" />
                <div>
                    <AlertTitle class="text-destructive">"Summary generation failed"</AlertTitle>
                    <AlertDescription>"Something went wrong while summarizing this note."</AlertDescription>
                    <AlertActions>
                        <Button size=ButtonSize::Xs on:click=move |_| generate()>
                            <RefreshCw />
                            "Try again"
                        </Button>
                    </AlertActions>
                </div>
            </Alert>
        }
        .into_any(),
        PanelView::Empty { kind } => view! { <EmptyState kind=kind on_generate=on_generate /> }.into_any(),
        PanelView::Enhanced(rendered) => {
            let footer = word_count_footer(&rendered);
            view! { <div>{rendered_body(rendered)} {footer}</div> }.into_any()
        }
        PanelView::Highlighted(rendered) => {
            let footer = word_count_footer(&rendered);
            let showing_diff = move || diff.with(|d| d.is_some());
            view! {
                <div class="space-y-3">
                    <div class="flex items-center justify-between gap-2">
                        <Badge variant=BadgeVariant::Highlight>
                            <Sparkles />
                            "Highlighted text was added by AI"
                        </Badge>
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Xs on:click=move |_| on_toggle_diff.run(())>
                            {move || if showing_diff() { "Hide changes" } else { "Compare with original" }}
                        </Button>
                    </div>
                    {move || match diff.get() {
                        Some(segments) => view! { <DiffView segments=segments /> }.into_any(),
                        None => ().into_any(),
                    }}
                    <div class:hidden=showing_diff>{rendered_body(rendered)}</div>
                    {footer}
                </div>
            }
            .into_any()
        }
        PanelView::Legacy(rendered) => view! {
            <div class="space-y-3">
                <Alert>
                    <Sparkles class="size-4" />
                    <div>
                        <AlertTitle>"Legacy content"</AlertTitle>
                        <AlertDescription>
                            "This version was created before AI changes were highlighted. Regenerate it to see what was added."
                        </AlertDescription>
                        <AlertActions>
                            <Button size=ButtonSize::Xs on:click=move |_| generate()>
                                <RefreshCw />
                                "Regenerate"
                            </Button>
                        </AlertActions>
                    </div>
                </Alert>
                {rendered_body(rendered)}
            </div>
        }
        .into_any(),
    };

    view! {
        <section id=PANEL_DOM_ID role="tabpanel" class=wrapper_class data-name="DisplayPanel">
            {body}
        </section>
    }
}
