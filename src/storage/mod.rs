use crate::config::ViewPreferences;
use serde::{Deserialize, Serialize};

/// Session token written by the backend's auth flow.
pub(crate) const TOKEN_KEY: &str = "notes_auth_token";
pub(crate) const VIEW_PREFS_KEY: &str = "notes_view_prefs";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()
        .flatten()
        .filter(|s| !s.trim().is_empty())
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring unreadable stored value");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn load_view_prefs() -> ViewPreferences {
    load_json_from_storage(VIEW_PREFS_KEY).unwrap_or_default()
}

pub(crate) fn save_view_prefs(prefs: &ViewPreferences) {
    save_json_to_storage(VIEW_PREFS_KEY, prefs);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::config::{FontSize, ViewMode};
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_view_prefs_roundtrip() {
        remove_from_storage(VIEW_PREFS_KEY);
        assert_eq!(load_view_prefs(), ViewPreferences::default());

        let prefs = ViewPreferences {
            font_size: FontSize::Large,
            view_mode: ViewMode::TwoColumn,
            ..Default::default()
        };
        save_view_prefs(&prefs);
        assert_eq!(load_view_prefs(), prefs);

        remove_from_storage(VIEW_PREFS_KEY);
    }

    #[wasm_bindgen_test]
    fn test_corrupt_prefs_fall_back_to_defaults() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(VIEW_PREFS_KEY, "{not json");
        }
        assert_eq!(load_view_prefs(), ViewPreferences::default());
        remove_from_storage(VIEW_PREFS_KEY);
    }
}
