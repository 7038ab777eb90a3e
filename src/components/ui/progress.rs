use leptos::prelude::*;
use tw_merge::tw_merge;

/// Determinate progress bar; `value` is a percentage.
#[component]
pub fn Progress(
    #[prop(into)] value: Signal<u8>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative h-1.5 w-full overflow-hidden rounded-full bg-primary/15",
        class
    );
    let width = move || format!("width: {}%", value.get().min(100));

    view! {
        <div
            class=merged_class
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow=move || value.get().to_string()
        >
            <div class="h-full rounded-full bg-primary transition-[width] duration-700 ease-out" style=width />
        </div>
    }
}
