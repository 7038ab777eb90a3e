use crate::enhance::{SINGLE_VIEW_COOLDOWN_MS, TWO_COLUMN_COOLDOWN_MS};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};
use wasm_bindgen::JsValue;

const DEFAULT_API_URL: &str = "http://localhost:54321";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub anon_key: String,
    pub log_level: String,
}

/// Read `key` from `window.ENV`, accepting both `API_URL` and `api_url` spellings.
fn env_value(env: &JsValue, key: &str) -> Option<String> {
    [key.to_string(), key.to_lowercase()]
        .iter()
        .filter_map(|k| js_sys::Reflect::get(env, &k.as_str().into()).ok())
        .find_map(|v| v.as_string())
        .filter(|s| !s.trim().is_empty())
}

impl EnvConfig {
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object());

        let read = |key: &str| env.as_ref().and_then(|e| env_value(e, key));

        Self {
            api_url: read("API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            anon_key: read("ANON_KEY").unwrap_or_default(),
            log_level: read("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn class(self) -> &'static str {
        match self {
            FontSize::Small => "text-sm",
            FontSize::Medium => "text-base",
            FontSize::Large => "text-lg",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum TextAlign {
    #[default]
    Left,
    Justify,
}

impl TextAlign {
    pub fn class(self) -> &'static str {
        match self {
            TextAlign::Left => "text-left",
            TextAlign::Justify => "text-justify",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub(crate) enum ViewMode {
    #[default]
    Single,
    TwoColumn,
}

impl ViewMode {
    /// How long a manual tab choice blocks auto-advance.
    pub fn cooldown_ms(self) -> i64 {
        match self {
            ViewMode::Single => SINGLE_VIEW_COOLDOWN_MS,
            ViewMode::TwoColumn => TWO_COLUMN_COOLDOWN_MS,
        }
    }
}

/// Reader preferences. Unknown keys are ignored and missing ones take defaults.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ViewPreferences {
    pub font_size: FontSize,
    pub text_align: TextAlign,
    pub view_mode: ViewMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_preferences_defaults_for_missing_keys() {
        let prefs: ViewPreferences =
            serde_json::from_str(r#"{"fontSize":"large","somethingElse":1}"#)
                .expect("prefs should parse");
        assert_eq!(prefs.font_size, FontSize::Large);
        assert_eq!(prefs.text_align, TextAlign::Left);
        assert_eq!(prefs.view_mode, ViewMode::Single);
    }

    #[test]
    fn test_view_preferences_serialize_shape() {
        let prefs = ViewPreferences {
            view_mode: ViewMode::TwoColumn,
            text_align: TextAlign::Justify,
            ..Default::default()
        };
        let v = serde_json::to_value(prefs).expect("should serialize");
        assert_eq!(v["viewMode"], "twoColumn");
        assert_eq!(v["textAlign"], "justify");
        assert_eq!(v["fontSize"], "medium");
    }

    #[test]
    fn test_view_mode_cooldowns() {
        assert_eq!(ViewMode::Single.cooldown_ms(), 2_000);
        assert_eq!(ViewMode::TwoColumn.cooldown_ms(), 5_000);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let parsed = serde_json::from_str::<ViewPreferences>(r#"{"viewMode":"grid"}"#);
        assert!(parsed.is_err());
    }
}
