//! Symmetric encryption for values stored in the translator configuration.
//!
//! Sensitive settings (the subscription key and the service endpoint) are kept
//! in the configuration file as `base64(nonce || ciphertext)` produced by
//! [`ConfigCipher::encrypt`]. The server only ever decrypts them; encryption is
//! exposed so operators can produce new values from the command line.
//!
//! Values encrypted with the older AES-CBC scheme cannot be read by this
//! cipher. Re-encrypt each of them with `translator-api encrypt <PLAINTEXT>`
//! and store the output in the settings file.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chacha20poly1305::KeyInit;
use chacha20poly1305::XChaCha20Poly1305;
use chacha20poly1305::XNonce;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::aead::AeadCore;
use chacha20poly1305::aead::OsRng;
use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;

/// Environment variable holding the hex-encoded master key.
pub const MASTER_KEY_ENV_VAR: &str = "TRANSLATOR_MASTER_KEY";

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 24;

#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("master key must be 32 bytes encoded as 64 hex characters")]
    InvalidKey,

    #[error("master key is not valid hex: {0}")]
    KeyEncoding(#[from] hex::FromHexError),

    #[error("encrypted value is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("encrypted value is too short")]
    Truncated,

    #[error("failed to encrypt value")]
    Encrypt,

    #[error("failed to decrypt value")]
    Decrypt,

    #[error("decrypted value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, SecretsError>;

/// 32 bytes of key material, wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let mut decoded = hex::decode(encoded.trim())?;
        if decoded.len() != KEY_LEN {
            decoded.zeroize();
            return Err(SecretsError::InvalidKey);
        }
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self(bytes))
    }

    /// Generate a fresh random key from the OS RNG.
    pub fn generate() -> Self {
        let key = XChaCha20Poly1305::generate_key(&mut OsRng);
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(key.as_slice());
        Self(bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Cipher for configuration values. Built once at startup and shared
/// read-only between requests.
#[derive(Clone)]
pub struct ConfigCipher {
    cipher: XChaCha20Poly1305,
}

impl ConfigCipher {
    pub fn new(key: &MasterKey) -> Result<Self> {
        let cipher =
            XChaCha20Poly1305::new_from_slice(&key.0).map_err(|_| SecretsError::InvalidKey)?;
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext`. An empty input yields an empty output.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| SecretsError::Encrypt)?;

        let mut payload = nonce.to_vec();
        payload.extend(ciphertext);
        Ok(BASE64_STANDARD.encode(payload))
    }

    /// Decrypt a value produced by [`ConfigCipher::encrypt`]. An empty input
    /// yields an empty output.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Ok(String::new());
        }

        let payload = BASE64_STANDARD.decode(encoded)?;
        if payload.len() <= NONCE_LEN {
            return Err(SecretsError::Truncated);
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                tracing::debug!("configuration value failed authentication");
                SecretsError::Decrypt
            })?;

        Ok(String::from_utf8(plaintext)?)
    }
}

impl std::fmt::Debug for ConfigCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCipher").finish_non_exhaustive()
    }
}
