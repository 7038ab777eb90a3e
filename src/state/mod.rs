use crate::api::ApiClient;
use crate::config::{EnvConfig, ViewPreferences};
use crate::storage::{load_view_prefs, save_view_prefs};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Reader preferences, persisted on change.
    pub view_prefs: RwSignal<ViewPreferences>,
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        let stored_client = ApiClient::load_from_storage(config);

        Self {
            api_client: RwSignal::new(stored_client),
            view_prefs: RwSignal::new(load_view_prefs()),
        }
    }

    pub fn update_view_prefs(&self, f: impl FnOnce(&mut ViewPreferences)) {
        self.view_prefs.update(f);
        save_view_prefs(&self.view_prefs.get_untracked());
    }

    /// Drop a rejected session token; later requests fall back to the anon key.
    pub fn sign_out(&self) {
        ApiClient::clear_storage();
        self.api_client.update(|c| c.token = None);
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
