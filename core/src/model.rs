//! Domain records produced by the translation service clients.

/// A language the translation service accepts as a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// Language code (e.g. "es", "zh-Hans").
    pub code: String,
    /// Language name in English (e.g. "Spanish").
    pub name: String,
}

/// One translated string for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Target language code as reported by the service.
    pub language: String,
}

impl SupportedLanguage {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Translation {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}
