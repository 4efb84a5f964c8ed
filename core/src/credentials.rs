//! Access to the translation service credentials.
//!
//! The endpoint and subscription key live encrypted in the settings. They are
//! decrypted on demand for a single call and never cached.

use std::sync::Arc;

use translator_secrets::ConfigCipher;
use translator_secrets::MasterKey;
use zeroize::Zeroizing;

use crate::config::TranslatorSettings;
use crate::error::Result;
use crate::error::TranslatorError;

/// Endpoint and subscription key for one call to the translation service.
pub struct Credentials {
    endpoint: String,
    api_key: Zeroizing<String>,
}

impl Credentials {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: Zeroizing::new(api_key.into()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Decrypts credential values from the settings.
#[derive(Debug, Clone)]
pub struct CredentialProvider {
    settings: Arc<TranslatorSettings>,
    cipher: Option<ConfigCipher>,
}

impl CredentialProvider {
    pub fn new(settings: Arc<TranslatorSettings>, cipher: Option<ConfigCipher>) -> Self {
        Self { settings, cipher }
    }

    /// Build the provider, deriving the cipher from the configured master key
    /// once. Without a master key only empty values can be served.
    pub fn from_settings(settings: Arc<TranslatorSettings>) -> Result<Self> {
        let cipher = match settings.effective_master_key() {
            Some(encoded) => Some(ConfigCipher::new(&MasterKey::from_hex(&encoded)?)?),
            None => None,
        };
        Ok(Self::new(settings, cipher))
    }

    /// Decrypted service endpoint, or an empty string if none is configured.
    pub fn endpoint(&self) -> Result<String> {
        self.reveal(self.settings.translator.text_api.as_deref())
    }

    /// Decrypted subscription key, or an empty string if none is configured.
    pub fn api_key(&self) -> Result<String> {
        self.reveal(self.settings.translator.key_api.as_deref())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials::new(self.endpoint()?, self.api_key()?))
    }

    fn reveal(&self, encrypted: Option<&str>) -> Result<String> {
        let Some(encrypted) = encrypted.filter(|v| !v.trim().is_empty()) else {
            return Ok(String::new());
        };
        let cipher = self
            .cipher
            .as_ref()
            .ok_or(TranslatorError::MissingMasterKey)?;
        Ok(cipher.decrypt(encrypted)?)
    }
}
