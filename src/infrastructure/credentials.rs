//! API key loading.
//!
//! The key lives in a small TOML file kept out of the main config so the
//! config can be shared without leaking it:
//!
//! ```toml
//! key = "0123456789abcdef"
//! ```

use crate::domain::{GourmetError, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// File name of the key file inside the config directory.
pub const API_KEY_FILE: &str = "api_key.toml";

#[derive(Deserialize)]
struct KeyFile {
    key: String,
}

/// An API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for use in a request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Reads the API key from `path`.
///
/// # Errors
///
/// Returns [`GourmetError::Credentials`] if the file is missing, is not valid
/// TOML, has no `key` entry or the key is blank.
pub fn load_api_key(path: &Path) -> Result<ApiKey> {
    let credentials_error = |reason: String| GourmetError::Credentials {
        path: path.to_path_buf(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| credentials_error(e.to_string()))?;
    let file: KeyFile = toml::from_str(&contents).map_err(|e| credentials_error(e.message().to_string()))?;

    let key = file.key.trim();
    if key.is_empty() {
        return Err(credentials_error("key is empty".to_string()));
    }

    tracing::debug!(path = %path.display(), "API key loaded");
    Ok(ApiKey::new(key))
}
