use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Badge {
        base: "inline-flex items-center gap-1 rounded-full border px-2 py-0.5 text-[11px] font-medium whitespace-nowrap [&_svg]:size-3",
        variants: {
            variant: {
                Default: "border-transparent bg-secondary text-secondary-foreground",
                Outline: "text-muted-foreground",
                Highlight: "border-amber-300/60 bg-amber-100 text-amber-900 dark:border-amber-400/30 dark:bg-amber-400/15 dark:text-amber-200",
            },
            size: {
                Default: "",
            }
        },
        component: {
            element: span
        }
    }
}
