//! Translator error types.

use std::path::PathBuf;

use translator_secrets::MASTER_KEY_ENV_VAR;
use translator_secrets::SecretsError;

/// Error raised while talking to the translation service or preparing a call
/// to it.
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request to the translation service timed out.
    #[error("Translation timeout")]
    Timeout,

    /// Response body did not have the expected shape.
    #[error("Failed to parse {context} response: {source}")]
    Parse {
        context: &'static str,
        source: serde_json::Error,
    },

    /// Request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Encrypted configuration value could not be decrypted.
    #[error("Credential error: {0}")]
    Credentials(#[from] SecretsError),

    /// An encrypted value is configured but no key to decrypt it.
    #[error("Master key not configured (set {} or [secrets].master_key)", MASTER_KEY_ENV_VAR)]
    MissingMasterKey,
}

impl From<reqwest::Error> for TranslatorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Error raised while loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
