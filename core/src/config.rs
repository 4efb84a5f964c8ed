//! Translator configuration.
//!
//! Settings are read once at startup from a TOML file (`translator.toml` by
//! default) and shared read-only afterwards.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use translator_secrets::MASTER_KEY_ENV_VAR;

use crate::error::ConfigError;

/// Default settings file name.
pub const DEFAULT_CONFIG_FILE: &str = "translator.toml";

/// Region sent with every request to the translation service.
const DEFAULT_REGION: &str = "westeurope";

const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorSettings {
    /// `;`-separated host names accepted in the `Host` header, `*` for any.
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: String,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub translator: ServiceSettings,

    #[serde(default)]
    pub secrets: SecretsSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

/// External translation service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Default source language. Empty means autodetect.
    #[serde(default)]
    pub from: String,

    /// Default comma-separated target languages.
    #[serde(default)]
    pub to: String,

    /// Encrypted subscription key.
    #[serde(default)]
    pub key_api: Option<String>,

    /// Encrypted service endpoint URL.
    #[serde(default)]
    pub text_api: Option<String>,

    /// Subscription region.
    #[serde(default = "default_region")]
    pub region: String,

    /// Timeout in milliseconds. Transport defaults apply when unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsSettings {
    /// Hex-encoded master key. The environment variable takes precedence.
    #[serde(default)]
    pub master_key: Option<String>,
}

fn default_allowed_hosts() -> String {
    "*".to_string()
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            allowed_hosts: default_allowed_hosts(),
            server: ServerSettings::default(),
            translator: ServiceSettings::default(),
            secrets: SecretsSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            key_api: None,
            text_api: None,
            region: default_region(),
            timeout_ms: None,
        }
    }
}

impl TranslatorSettings {
    /// Load settings from `path`, or return defaults if the file does not
    /// exist. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::warn!(
                "Settings file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the effective master key: the environment wins over the file.
    pub fn effective_master_key(&self) -> Option<String> {
        resolve_master_key(
            std::env::var(MASTER_KEY_ENV_VAR).ok(),
            self.secrets.master_key.as_deref(),
        )
    }
}

impl ServiceSettings {
    /// Get the effective default source language.
    pub fn effective_from(&self) -> Option<&str> {
        Some(self.from.trim()).filter(|f| !f.is_empty())
    }

    /// Get the effective request timeout.
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn resolve_master_key(from_env: Option<String>, configured: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|k| !k.trim().is_empty())
                .map(str::to_string)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn settings_defaults() {
        let settings: TranslatorSettings = toml::from_str("").unwrap();

        assert_eq!(settings.allowed_hosts, "*");
        assert_eq!(settings.server.listen, "127.0.0.1:5000");
        assert_eq!(settings.translator.region, "westeurope");
        assert_eq!(settings.translator.effective_from(), None);
        assert_eq!(settings.translator.effective_timeout(), None);
        assert_eq!(settings.translator.key_api, None);
    }

    #[test]
    fn settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
allowed_hosts = "localhost;*.example.com"

[server]
listen = "0.0.0.0:8080"

[translator]
from = "en"
to = "es,fr"
key_api = "a2V5"
text_api = "ZW5kcG9pbnQ="
timeout_ms = 1500
"#
        )
        .unwrap();

        let settings = TranslatorSettings::load(file.path()).unwrap();

        assert_eq!(settings.allowed_hosts, "localhost;*.example.com");
        assert_eq!(settings.server.listen, "0.0.0.0:8080");
        assert_eq!(settings.translator.effective_from(), Some("en"));
        assert_eq!(settings.translator.to, "es,fr");
        assert_eq!(settings.translator.key_api.as_deref(), Some("a2V5"));
        assert_eq!(settings.translator.text_api.as_deref(), Some("ZW5kcG9pbnQ="));
        assert_eq!(settings.translator.region, "westeurope");
        assert_eq!(
            settings.translator.effective_timeout(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = TranslatorSettings::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.allowed_hosts, "*");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[translator\nto = 3").unwrap();

        let err = TranslatorSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn master_key_resolution() {
        assert_eq!(
            resolve_master_key(Some("env".to_string()), Some("file")),
            Some("env".to_string())
        );
        assert_eq!(
            resolve_master_key(Some("  ".to_string()), Some("file")),
            Some("file".to_string())
        );
        assert_eq!(resolve_master_key(None, Some("")), None);
        assert_eq!(resolve_master_key(None, None), None);
    }
}
