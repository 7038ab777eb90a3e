use crate::config::EnvConfig;
use crate::pages::{NotePage, NotesPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn AppShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-background text-foreground">
            <header class="border-b">
                <div class="mx-auto flex h-12 w-full max-w-5xl items-center px-4">
                    <a href="/" class="text-sm font-semibold">"Notecraft"</a>
                </div>
            </header>
            <main class="mx-auto w-full max-w-5xl px-4 py-6">{children()}</main>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new(&EnvConfig::new())));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <AppShell>
                <Routes fallback=|| view! { <div class="py-8 text-xs text-muted-foreground">"Not found"</div> }>
                    <Route path=path!("note/:note_id") view=NotePage />
                    <Route path=path!("") view=NotesPage />
                </Routes>
            </AppShell>
        </Router>
    }
}
