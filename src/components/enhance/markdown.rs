use crate::content::render::{inline_text, ListItem};
use crate::content::{Block, Inline};
use leptos::prelude::*;
use tw_merge::tw_merge;

fn heading_id(content: &[Inline]) -> String {
    let slug: String = inline_text(content)
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    slug.split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn inline_view(inline: Inline) -> AnyView {
    match inline {
        Inline::Text(t) => t.into_any(),
        Inline::Strong(c) => view! { <strong class="font-semibold">{inlines_view(c)}</strong> }.into_any(),
        Inline::Emphasis(c) => view! { <em>{inlines_view(c)}</em> }.into_any(),
        Inline::Code(c) => view! {
            <code class="rounded bg-muted px-1 py-0.5 font-mono text-[0.9em]">{c}</code>
        }
        .into_any(),
        Inline::Enriched(t) => view! {
            <span class="enriched-content rounded bg-sky-500/10 px-0.5 text-sky-900 dark:text-sky-200">{t}</span>
        }
        .into_any(),
        Inline::Highlight(c) => view! {
            <mark
                class="rounded bg-amber-200/60 px-0.5 text-foreground dark:bg-amber-400/20"
                data-ai-enhanced="true"
            >
                {inlines_view(c)}
            </mark>
        }
        .into_any(),
        Inline::LineBreak => view! { <br /> }.into_any(),
    }
}

fn inlines_view(items: Vec<Inline>) -> AnyView {
    items.into_iter().map(inline_view).collect_view().into_any()
}

fn list_item_view(item: ListItem) -> AnyView {
    let indent = format!("margin-left: {}rem", item.depth as f32 * 1.25);
    view! { <li style=indent>{inlines_view(item.content)}</li> }.into_any()
}

fn block_view(block: Block) -> AnyView {
    match block {
        Block::Heading { level, content } => {
            let id = heading_id(&content);
            let body = inlines_view(content);
            match level {
                1 => view! { <h1 id=id class="mt-6 mb-3 text-2xl font-semibold first:mt-0">{body}</h1> }.into_any(),
                2 => view! { <h2 id=id class="mt-5 mb-2 text-xl font-semibold first:mt-0">{body}</h2> }.into_any(),
                3 => view! { <h3 id=id class="mt-4 mb-2 text-lg font-semibold first:mt-0">{body}</h3> }.into_any(),
                _ => view! { <h4 id=id class="mt-3 mb-1 font-semibold first:mt-0">{body}</h4> }.into_any(),
            }
        }
        Block::Paragraph(c) => view! { <p class="my-3 leading-relaxed">{inlines_view(c)}</p> }.into_any(),
        Block::List { ordered, items } => {
            let items = items.into_iter().map(list_item_view).collect_view();
            if ordered {
                view! { <ol class="my-3 list-decimal space-y-1 pl-6">{items}</ol> }.into_any()
            } else {
                view! { <ul class="my-3 list-disc space-y-1 pl-6">{items}</ul> }.into_any()
            }
        }
        Block::Quote(inner) => view! {
            <blockquote class="my-3 rounded-r-md border-l-4 border-primary/40 bg-muted/40 py-1 pl-4 pr-2">
                {blocks_view(inner)}
            </blockquote>
        }
        .into_any(),
        Block::Code(code) => view! {
            <pre class="my-3 overflow-x-auto rounded-md bg-muted p-3 font-mono text-[0.85em]">
                <code>{code}</code>
            </pre>
        }
        .into_any(),
        Block::Rule => view! { <hr class="my-4 border-border" /> }.into_any(),
    }
}

fn blocks_view(blocks: Vec<Block>) -> AnyView {
    blocks.into_iter().map(block_view).collect_view().into_any()
}

/// Renders the block model produced by the normalizer.
#[component]
pub(crate) fn MarkdownView(
    blocks: Vec<Block>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = tw_merge!("break-words text-foreground", class);

    view! { <div class=merged_class data-name="MarkdownView">{blocks_view(blocks)}</div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_id_slug() {
        let content = vec![
            Inline::Text("Cell ".to_string()),
            Inline::Strong(vec![Inline::Text("Biology!".to_string())]),
        ];
        assert_eq!(heading_id(&content), "cell-biology");
    }
}
