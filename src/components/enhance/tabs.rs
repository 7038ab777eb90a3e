use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::enhance::{next_tab, prev_tab, TabOption, TabState};
use crate::models::ContentType;
use icons::{Check, X};
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub(crate) const PANEL_DOM_ID: &str = "note-content-panel";

pub(crate) fn tab_dom_id(ct: ContentType) -> String {
    format!("note-tab-{ct}")
}

fn focus_tab(ct: ContentType) {
    if let Some(el) = document()
        .get_element_by_id(&tab_dom_id(ct))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}

fn state_indicator(option: &TabOption) -> AnyView {
    match option.state {
        TabState::Generating => view! { <Spinner class="size-3" label="Generating" /> }.into_any(),
        TabState::Failed => view! { <X class="size-3 text-destructive" /> }.into_any(),
        TabState::Ready if option.content_type != ContentType::Original => {
            view! { <Check class="size-3 text-emerald-600" /> }.into_any()
        }
        TabState::Empty => view! { <span class="text-muted-foreground/60">"+"</span> }.into_any(),
        TabState::Ready => ().into_any(),
    }
}

/// Tab strip over the note's content versions. Every version is always listed; empty ones can be
/// selected to offer generation. Arrow keys move between tabs, Home/End jump to the ends.
#[component]
pub(crate) fn EnhancementTabs(
    #[prop(into)] options: Signal<Vec<TabOption>>,
    on_select: Callback<ContentType>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let active = move || {
        options
            .with_untracked(|opts| opts.iter().find(|o| o.active).map(|o| o.content_type))
            .unwrap_or_default()
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if disabled.get_untracked() {
            return;
        }
        let current = active();
        let target = match ev.key().as_str() {
            "ArrowRight" => next_tab(current),
            "ArrowLeft" => prev_tab(current),
            "Home" => ContentType::Original,
            "End" => ContentType::Improved,
            _ => return,
        };
        ev.prevent_default();
        on_select.run(target);
        focus_tab(target);
    };

    view! {
        <div
            role="tablist"
            aria-label="Note versions"
            class="flex flex-wrap items-center gap-1 rounded-full bg-muted/60 p-1"
            on:keydown=on_keydown
        >
            <For
                each=move || options.get()
                key=|o| (o.content_type, o.state, o.active)
                children=move |option: TabOption| {
                    let ct = option.content_type;
                    let selected = option.active;
                    let indicator = state_indicator(&option);
                    view! {
                        <Button
                            variant=ButtonVariant::Tab
                            size=ButtonSize::Xs
                            attr:id=tab_dom_id(ct)
                            attr:role="tab"
                            attr:aria-selected=selected.to_string()
                            attr:aria-controls=PANEL_DOM_ID
                            attr:tabindex=if selected { "0" } else { "-1" }
                            attr:data-state=format!("{:?}", option.state).to_lowercase()
                            attr:disabled=move || disabled.get()
                            on:click=move |_| on_select.run(ct)
                        >
                            {option.label}
                            {indicator}
                        </Button>
                    }
                }
            />
        </div>
    }
}
