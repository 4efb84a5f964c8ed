//! Supported-language catalog.
//!
//! Documentation:
//! <https://learn.microsoft.com/en-us/azure/ai-services/translator/text-translation/reference/v3/languages>

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::Deserialize;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::error::TranslatorError;
use crate::model::SupportedLanguage;
use crate::service;

/// Source of the languages the translation service accepts as targets.
#[async_trait]
pub trait LanguageCatalog: Send + Sync {
    /// Fetch the current catalog. Nothing is cached between calls.
    async fn fetch_supported_languages(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<SupportedLanguage>>;
}

/// Catalog backed by the `languages` endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    region: String,
}

impl CatalogClient {
    pub fn new(http: Client, region: impl Into<String>) -> Self {
        Self {
            http,
            region: region.into(),
        }
    }
}

#[async_trait]
impl LanguageCatalog for CatalogClient {
    async fn fetch_supported_languages(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<SupportedLanguage>> {
        let url = service::service_url(credentials.endpoint(), &languages_route());
        tracing::debug!("Fetching supported languages");

        let request = service::with_subscription(self.http.get(&url), credentials, &self.region);
        let body = service::read_body(request.send().await?, "languages").await?;

        let languages = parse_languages(&body)?;
        tracing::debug!("Catalog lists {} languages", languages.len());
        Ok(languages)
    }
}

fn languages_route() -> String {
    format!("languages?api-version={}&scope=translation", service::API_VERSION)
}

/// Map a `languages` response body into catalog entries, in document order.
/// A body without a `translation` section yields an empty catalog.
pub(crate) fn parse_languages(body: &str) -> Result<Vec<SupportedLanguage>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let response: Option<LanguagesResponse> =
        serde_json::from_str(body).map_err(|source| TranslatorError::Parse {
            context: "languages",
            source,
        })?;

    Ok(response
        .and_then(|r| r.translation)
        .map(|translation| {
            translation
                .into_iter()
                .map(|(code, details)| SupportedLanguage {
                    code,
                    name: details.and_then(|d| d.name).unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default())
}

// `languages` API types
// {"translation":{"af":{"name":"Afrikaans","nativeName":"Afrikaans","dir":"ltr"}}}
#[derive(Deserialize)]
struct LanguagesResponse {
    #[serde(default)]
    translation: Option<IndexMap<String, Option<LanguageDetails>>>,
}

#[derive(Deserialize)]
struct LanguageDetails {
    #[serde(default)]
    name: Option<String>,
}
