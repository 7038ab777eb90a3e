use crate::config::EnvConfig;
use crate::models::{EnhancementKind, Note};
use crate::storage::{load_string_from_storage, remove_from_storage, TOKEN_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    /// The enrichment function answered but refused the job.
    #[error("Enhancement rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EnhanceRequest {
    pub note_id: String,
    pub enhancement_type: EnhancementKind,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EnhanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UpdateContentRequest {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            token: None,
        }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.api_url.clone(), config.anon_key.clone())
    }

    pub fn load_from_storage(config: &EnvConfig) -> Self {
        let mut client = Self::from_config(config);
        client.token = load_string_from_storage(TOKEN_KEY);
        client
    }

    pub fn clear_storage() {
        remove_from_storage(TOKEN_KEY);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer value: the session token when signed in, otherwise the anon key.
    pub fn get_auth_header(&self) -> Option<String> {
        let bearer = self.token.as_deref().unwrap_or(&self.anon_key);
        (!bearer.is_empty()).then(|| format!("Bearer {bearer}"))
    }

    pub(crate) fn note_url(&self, note_id: &str) -> String {
        format!(
            "{}/rest/v1/notes?id=eq.{}&select=*",
            self.base_url,
            urlencoding::encode(note_id)
        )
    }

    pub(crate) fn note_list_url(&self, limit: usize) -> String {
        format!(
            "{}/rest/v1/notes?select=*&is_archived=eq.false\
             &order=is_pinned.desc,updated_at.desc&limit={limit}",
            self.base_url
        )
    }

    pub(crate) fn enhance_url(&self) -> String {
        format!("{}/functions/v1/enhance-note", self.base_url)
    }

    fn with_auth_headers(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if !self.anon_key.is_empty() {
            req = req.header("apikey", &self.anon_key);
        }
        if let Some(value) = self.get_auth_header() {
            req = req.header("Authorization", value);
        }
        req
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        ctx: &str,
    ) -> ApiResult<T> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            return res.json().await.map_err(ApiError::parse);
        }

        let err = if status.as_u16() == 401 {
            ApiError::Unauthorized
        } else {
            ApiError::Http {
                status: status.as_u16(),
                body: res.text().await.unwrap_or_default(),
            }
        };
        tracing::warn!(%err, ctx, "api request failed");
        Err(err)
    }

    pub async fn get_note(&self, note_id: &str) -> ApiResult<Note> {
        let client = reqwest::Client::new();
        let rows: Vec<Note> = self
            .send(client.get(self.note_url(note_id)), "get_note")
            .await?;
        first_row(rows, note_id)
    }

    pub async fn list_notes(&self, limit: usize) -> ApiResult<Vec<Note>> {
        let client = reqwest::Client::new();
        self.send(client.get(self.note_list_url(limit)), "list_notes")
            .await
    }

    pub async fn update_note_content(&self, note_id: &str, content: &str) -> ApiResult<Note> {
        let client = reqwest::Client::new();
        let url = format!(
            "{}/rest/v1/notes?id=eq.{}",
            self.base_url,
            urlencoding::encode(note_id)
        );
        let req = client
            .patch(url)
            .header("Prefer", "return=representation")
            .json(&UpdateContentRequest {
                content: content.to_string(),
            });
        let rows: Vec<Note> = self.send(req, "update_note_content").await?;
        first_row(rows, note_id)
    }

    /// Ask the enrichment function to (re)generate one variant. The result arrives later on the
    /// note itself.
    pub async fn enhance_note(&self, note_id: &str, kind: EnhancementKind) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = client.post(self.enhance_url()).json(&EnhanceRequest {
            note_id: note_id.to_string(),
            enhancement_type: kind,
        });
        let res: EnhanceResponse = self.send(req, "enhance_note").await?;
        check_enhance_response(res)
    }
}

fn first_row(rows: Vec<Note>, note_id: &str) -> ApiResult<Note> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(note_id.to_string()))
}

/// A 2xx reply can still refuse the job: `success: false` or a non-blank `error`.
pub(crate) fn check_enhance_response(res: EnhanceResponse) -> ApiResult<()> {
    match res.error {
        Some(msg) if !msg.trim().is_empty() => Err(ApiError::Rejected(msg)),
        _ if !res.success => Err(ApiError::Rejected("no reason given".to_string())),
        _ => Ok(()),
    }
}


// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_api_client_storage_roundtrip_token() {
        ApiClient::clear_storage();
        let config = EnvConfig::new();

        let c = ApiClient::load_from_storage(&config);
        assert!(!c.is_authenticated());

        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(TOKEN_KEY, "t1");
        }
        let c2 = ApiClient::load_from_storage(&config);
        assert_eq!(c2.token.as_deref(), Some("t1"));
        assert!(c2.is_authenticated());

        ApiClient::clear_storage();
        assert!(ApiClient::load_from_storage(&config).token.is_none());
    }
}
