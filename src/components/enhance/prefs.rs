use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::config::{FontSize, TextAlign, ViewMode};
use crate::state::AppContext;
use leptos::prelude::*;
use strum::IntoEnumIterator;

fn font_size_label(size: FontSize) -> &'static str {
    match size {
        FontSize::Small => "A-",
        FontSize::Medium => "A",
        FontSize::Large => "A+",
    }
}

/// Reader controls: font size, alignment and single/two-column layout. Changes persist.
#[component]
pub(crate) fn ViewPreferencesBar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let prefs = app_state.0.view_prefs;
    let state = app_state.0;

    let sizes = FontSize::iter()
        .map(|size| {
            view! {
                <Button
                    variant=ButtonVariant::Tab
                    size=ButtonSize::Xs
                    attr:aria-selected=move || (prefs.get().font_size == size).to_string()
                    attr:title=format!("Font size: {size}")
                    on:click=move |_| state.update_view_prefs(|p| p.font_size = size)
                >
                    {font_size_label(size)}
                </Button>
            }
        })
        .collect_view();

    let toggle_align = move |_: web_sys::MouseEvent| {
        state.update_view_prefs(|p| {
            p.text_align = match p.text_align {
                TextAlign::Left => TextAlign::Justify,
                TextAlign::Justify => TextAlign::Left,
            }
        })
    };

    let toggle_mode = move |_: web_sys::MouseEvent| {
        state.update_view_prefs(|p| {
            p.view_mode = match p.view_mode {
                ViewMode::Single => ViewMode::TwoColumn,
                ViewMode::TwoColumn => ViewMode::Single,
            }
        })
    };

    view! {
        <div class="flex items-center gap-1 text-xs" data-name="ViewPreferencesBar">
            <div class="flex items-center gap-0.5 rounded-full bg-muted/60 p-0.5">{sizes}</div>
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Xs on:click=toggle_align>
                {move || match prefs.get().text_align {
                    TextAlign::Left => "Justify",
                    TextAlign::Justify => "Align left",
                }}
            </Button>
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Xs on:click=toggle_mode>
                {move || match prefs.get().view_mode {
                    ViewMode::Single => "Side by side",
                    ViewMode::TwoColumn => "Single view",
                }}
            </Button>
        </div>
    }
}
