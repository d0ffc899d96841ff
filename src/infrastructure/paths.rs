//! Platform paths for configuration and data files.
//!
//! Configuration lives under the platform config directory
//! (`~/.config/gourmet` on Linux) and data (favorites, logs) under the platform
//! data directory (`~/.local/share/gourmet`). When the platform reports neither,
//! the current directory is used so the app still starts.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "gourmet";

/// Returns the configuration directory, `<config_dir>/gourmet`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the data directory, `<data_dir>/gourmet`.
///
/// Holds `favorites.json`, `gourmet.log` and the optional span export.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use gourmet::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/etc/gourmet.toml"), PathBuf::from("/etc/gourmet.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
