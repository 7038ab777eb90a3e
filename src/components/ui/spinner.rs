use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] label: Option<String>,
) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);
    let label = label.unwrap_or_else(|| "Loading".to_string());

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label=label /> }
}
