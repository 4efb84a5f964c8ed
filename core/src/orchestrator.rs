//! Translation orchestrator.
//!
//! Validates requested target languages against the live catalog, forwards
//! the surviving targets to the translator and optionally re-orders the
//! results. Holds no per-request state.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::catalog::LanguageCatalog;
use crate::client::TextTranslator;
use crate::client::TranslationClient;
use crate::config::TranslatorSettings;
use crate::credentials::CredentialProvider;
use crate::error::Result;
use crate::model::SupportedLanguage;
use crate::model::Translation;
use crate::service;

pub struct TranslationOrchestrator {
    catalog: Arc<dyn LanguageCatalog>,
    translator: Arc<dyn TextTranslator>,
    credentials: CredentialProvider,
}

impl TranslationOrchestrator {
    pub fn new(
        catalog: Arc<dyn LanguageCatalog>,
        translator: Arc<dyn TextTranslator>,
        credentials: CredentialProvider,
    ) -> Self {
        Self {
            catalog,
            translator,
            credentials,
        }
    }

    /// Wire the HTTP-backed catalog and translator from settings.
    pub fn from_settings(settings: Arc<TranslatorSettings>) -> Result<Self> {
        let http = service::build_http_client(&settings.translator)?;
        let region = settings.translator.region.clone();
        let credentials = CredentialProvider::from_settings(settings)?;

        Ok(Self::new(
            Arc::new(CatalogClient::new(http.clone(), region.clone())),
            Arc::new(TranslationClient::new(http, region)),
            credentials,
        ))
    }

    /// The full catalog, without any validation.
    pub async fn languages(&self) -> Result<Vec<SupportedLanguage>> {
        let credentials = self.credentials.credentials()?;
        self.catalog.fetch_supported_languages(&credentials).await
    }

    /// Keep the comma-separated codes in `to` that the catalog supports, once
    /// each, in the order they were requested. Unsupported codes are dropped
    /// silently. An empty `to` never reaches the catalog.
    pub async fn validate_supported_languages(&self, to: &str) -> Result<Vec<String>> {
        if to.is_empty() {
            return Ok(Vec::new());
        }

        let catalog = self.languages().await?;
        Ok(select_supported(to, &catalog))
    }

    /// Translate `texts` into the supported languages listed in `to`.
    ///
    /// `from = None` (or empty) lets the service detect the source language.
    /// With `sort_by_language` the output follows the order of the validated
    /// targets instead of the order the service answered in.
    pub async fn translate(
        &self,
        texts: &[String],
        to: &str,
        from: Option<&str>,
        sort_by_language: bool,
    ) -> Result<Vec<Translation>> {
        let targets = self.validate_supported_languages(to).await?;
        if targets.is_empty() {
            tracing::warn!("No supported target language in {to:?}, skipping translation");
            return Ok(Vec::new());
        }

        let credentials = self.credentials.credentials()?;
        let translations = self
            .translator
            .translate(texts, &targets, from, &credentials)
            .await?;
        tracing::debug!(
            "Received {} translation(s) for {} target(s)",
            translations.len(),
            targets.len()
        );

        if sort_by_language {
            Ok(sort_by_target_order(translations, &targets))
        } else {
            Ok(translations)
        }
    }

    /// Translate with an explicit source language.
    pub async fn translate_from(
        &self,
        texts: &[String],
        to: &str,
        from: &str,
        sort_by_language: bool,
    ) -> Result<Vec<Translation>> {
        self.translate(texts, to, Some(from), sort_by_language).await
    }

    /// Translate letting the service detect the source language.
    pub async fn translate_autodetect(
        &self,
        texts: &[String],
        to: &str,
        sort_by_language: bool,
    ) -> Result<Vec<Translation>> {
        self.translate(texts, to, None, sort_by_language).await
    }
}

/// Filter the comma-separated `requested` codes down to those present in
/// `catalog` (case-insensitive), first occurrence wins. Tokens are compared
/// as written, so `" fr"` does not match `fr`.
pub fn select_supported(requested: &str, catalog: &[SupportedLanguage]) -> Vec<String> {
    let mut valid: Vec<String> = Vec::new();
    for lang in requested.split(',') {
        let supported = catalog
            .iter()
            .any(|entry| entry.code.eq_ignore_ascii_case(lang));
        let seen = valid.iter().any(|kept| kept.eq_ignore_ascii_case(lang));
        if supported && !seen {
            valid.push(lang.to_string());
        }
    }
    valid
}

/// Stable sort of `translations` by the position of their language in
/// `targets`. Languages missing from `targets` go last, in arrival order.
pub fn sort_by_target_order(
    mut translations: Vec<Translation>,
    targets: &[String],
) -> Vec<Translation> {
    translations.sort_by_key(|translation| {
        targets
            .iter()
            .position(|target| target.eq_ignore_ascii_case(&translation.language))
            .unwrap_or(usize::MAX)
    });
    translations
}
