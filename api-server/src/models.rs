//! Wire records returned by the HTTP surface.

use serde::Deserialize;
use serde::Serialize;
use translator_core::SupportedLanguage;
use translator_core::Translation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SupportedLanguageApi {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranslationApi {
    pub text: String,
    pub language: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query string accepted by the translation endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateQuery {
    #[serde(default)]
    pub sort_by_language: bool,
}

impl From<SupportedLanguage> for SupportedLanguageApi {
    fn from(language: SupportedLanguage) -> Self {
        Self {
            code: language.code,
            name: language.name,
        }
    }
}

impl From<Translation> for TranslationApi {
    fn from(translation: Translation) -> Self {
        Self {
            text: translation.text,
            language: translation.language,
        }
    }
}
