use std::fmt;

use super::cipher::EncryptionKey;
use crate::core::EracunError;

/// Public HUB3 barcode renderer.
pub const DEFAULT_RENDERER_URL: &str = "https://hub3.dd-lab.hr/";

/// Environment variable holding the raw 32-byte encryption key.
pub const KEY_VAR: &str = "ERACUN_HUB3_KEY";

/// Environment variable overriding [`DEFAULT_RENDERER_URL`].
pub const RENDERER_URL_VAR: &str = "ERACUN_HUB3_RENDERER_URL";

/// Renderer endpoint and encryption key, loaded once at startup.
#[derive(Clone)]
pub struct Hub3Config {
    renderer_url: String,
    key: EncryptionKey,
}

impl Hub3Config {
    pub fn new(renderer_url: impl Into<String>, key: EncryptionKey) -> Result<Self, EracunError> {
        let renderer_url = renderer_url.into().trim().to_string();
        if !(renderer_url.starts_with("https://") || renderer_url.starts_with("http://")) {
            return Err(EracunError::Config(format!(
                "renderer URL must start with http:// or https://, got '{renderer_url}'"
            )));
        }
        Ok(Self { renderer_url, key })
    }

    /// Load from `ERACUN_HUB3_KEY` and `ERACUN_HUB3_RENDERER_URL`.
    pub fn from_env() -> Result<Self, EracunError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// The key is required; a blank renderer URL means the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EracunError> {
        let key = lookup(KEY_VAR)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| EracunError::Config(format!("{KEY_VAR} is not set")))?;
        let key = EncryptionKey::new(key.as_bytes())?;

        let renderer_url = lookup(RENDERER_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RENDERER_URL.to_string());
        Self::new(renderer_url, key)
    }

    pub fn renderer_url(&self) -> &str {
        &self.renderer_url
    }

    pub fn key(&self) -> &EncryptionKey {
        &self.key
    }

    /// `<renderer_url>?data=<payload>` for an already encrypted payload.
    pub fn barcode_url_for(&self, encrypted_payload: &str) -> String {
        format!("{}?data={encrypted_payload}", self.renderer_url)
    }
}

impl fmt::Debug for Hub3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hub3Config")
            .field("renderer_url", &self.renderer_url)
            .field("key", &self.key)
            .finish()
    }
}
