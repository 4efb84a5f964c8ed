//! Translation HTTP client.
//!
//! Route scheme:
//! - explicit source: `translate?api-version=3.0&from=en&to=fr&to=zu`
//! - autodetected source: `translate?api-version=3.0&to=fr&to=zu`

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::Serialize;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::error::TranslatorError;
use crate::model::Translation;
use crate::service;

/// Backend that turns texts into translations for a list of target languages.
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translate every text into every target. `targets` are sent as given,
    /// in order; callers are expected to de-duplicate them first.
    async fn translate(
        &self,
        texts: &[String],
        targets: &[String],
        from: Option<&str>,
        credentials: &Credentials,
    ) -> Result<Vec<Translation>>;
}

/// Translator backed by the `translate` endpoint.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: Client,
    region: String,
}

impl TranslationClient {
    pub fn new(http: Client, region: impl Into<String>) -> Self {
        Self {
            http,
            region: region.into(),
        }
    }
}

#[async_trait]
impl TextTranslator for TranslationClient {
    async fn translate(
        &self,
        texts: &[String],
        targets: &[String],
        from: Option<&str>,
        credentials: &Credentials,
    ) -> Result<Vec<Translation>> {
        let route = build_translate_route(targets, from);
        let body = build_request_body(texts)?;
        tracing::debug!("Translating {} text(s) via {route}", texts.len());

        let request = self
            .http
            .post(service::service_url(credentials.endpoint(), &route))
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(body);
        let request = service::with_subscription(request, credentials, &self.region);
        let response = service::read_body(request.send().await?, "translate").await?;

        parse_translations(&response)
    }
}

/// Build the route for a translate call. An empty `from` means autodetect.
pub fn build_translate_route(targets: &[String], from: Option<&str>) -> String {
    let mut route = format!("translate?api-version={}", service::API_VERSION);
    if let Some(from) = from.filter(|f| !f.is_empty()) {
        route.push_str("&from=");
        route.push_str(&urlencoding::encode(from));
    }
    for lang in targets {
        route.push_str("&to=");
        route.push_str(&urlencoding::encode(lang));
    }
    route
}

/// Serialize texts into the request body: `[{"Text": "..."}, ...]`.
pub fn build_request_body(texts: &[String]) -> Result<String> {
    let items: Vec<TextItem<'_>> = texts
        .iter()
        .map(|text| TextItem {
            text: text.as_str(),
        })
        .collect();
    serde_json::to_string(&items).map_err(TranslatorError::Encode)
}

/// Flatten a `translate` response body, keeping encounter order (outer
/// element by element, then each element's `translations`).
pub(crate) fn parse_translations(body: &str) -> Result<Vec<Translation>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items: Option<Vec<Option<TranslateItem>>> =
        serde_json::from_str(body).map_err(|source| TranslatorError::Parse {
            context: "translate",
            source,
        })?;

    Ok(items
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .flat_map(|item| item.translations.unwrap_or_default())
        .map(|entry| Translation {
            text: entry.text.unwrap_or_default(),
            language: entry.to.unwrap_or_default(),
        })
        .collect())
}

// `translate` API types
#[derive(Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

// [{"translations":[{"text":"De toute façon","to":"fr"},{"text":"Comunque","to":"it"}]}]
#[derive(Deserialize)]
struct TranslateItem {
    #[serde(default)]
    translations: Option<Vec<TranslationEntry>>,
}

#[derive(Deserialize)]
struct TranslationEntry {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    to: Option<String>,
}
