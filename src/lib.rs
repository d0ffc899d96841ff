//! gourmet: a terminal restaurant finder for the HotPepper gourmet API.
//!
//! gourmet provides:
//! - Keyword search with incremental pagination that loads the next page as
//!   you scroll near the end of the list
//! - Cancellation of superseded searches and a per-request timeout
//! - Persistent favorites stored as atomic JSON writes
//! - Coupon pages opened in the system browser
//! - A headless CLI (`gourmet search`, `gourmet favorites`) over the same core
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal runtime and CLI (main.rs)                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure state machine
//! │  - Event handling, pagination policy                │
//! │  - Action emission, view model computation          │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - Favorites   │   │ - Fetch tasks │
//! │ - Theming     │   │ - JSON I/O    │   │ - Cancel and  │
//! │ - Components  │   │               │   │   timeout     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//! ┌─────────────────────────────────────────────────────┐
//! │  API (api/), Infrastructure and Domain              │
//! │  - HotPepper client behind `ShopSource`             │
//! │  - Paths, credentials, errors, the Shop model       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Logs and optional OTLP span files are written by [`observability`].
//!
//! # Configuration
//!
//! Read from `<config_dir>/gourmet/config.toml`. Every key is optional:
//!
//! ```toml
//! endpoint = "https://webservice.recruit.co.jp/hotpepper/gourmet/v1/"
//! api_key_file = "~/.config/gourmet/api_key.toml"
//! favorites_file = "~/.local/share/gourmet/favorites.json"
//! request_timeout_secs = 10
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! otlp_export = true
//! browser = "firefox"
//! search_on_start = true
//! ```
//!
//! # Example
//!
//! ```rust
//! use gourmet::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default(), "ramen");
//! let (_, actions) = handle_event(&mut state, Event::Refresh);
//!
//! let Action::StartFetch(request) = &actions[0] else { panic!() };
//! assert_eq!(request.query.start, 1);
//! assert_eq!(request.query.keyword, "ramen");
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus, ViewMode};
pub use domain::{FetchError, GourmetError, Result, Shop};
pub use ui::Theme;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Name of the favorites file inside the data directory.
pub const FAVORITES_FILE: &str = "favorites.json";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from `config.toml`.
///
/// Paths may start with `~`. Unknown keys are rejected so typos surface at
/// startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API endpoint. Defaults to [`api::DEFAULT_ENDPOINT`].
    pub endpoint: Option<String>,

    /// TOML file holding `key = "..."`.
    pub api_key_file: Option<String>,

    pub favorites_file: Option<String>,

    /// Upper bound for a single page fetch. Default: 10.
    pub request_timeout_secs: u64,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme.
    pub theme_file: Option<String>,

    /// Filter directive such as `debug` or `gourmet=trace`. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Also export spans as OTLP JSON.
    pub otlp_export: bool,

    /// Browser application or path used instead of the system URL handler.
    pub browser: Option<String>,

    /// Run the initial search as soon as the UI starts.
    pub search_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_file: None,
            favorites_file: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: None,
            theme_file: None,
            trace_level: None,
            otlp_export: false,
            browser: None,
            search_on_start: true,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        infrastructure::get_config_dir().join(CONFIG_FILE)
    }

    /// Loads the configuration at `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GourmetError::Config`] if the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(GourmetError::Config(format!("failed to read {}: {e}", path.display())));
            }
        };

        toml::from_str(&contents)
            .map_err(|e| GourmetError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(api::DEFAULT_ENDPOINT)
    }

    #[must_use]
    pub fn api_key_path(&self) -> PathBuf {
        self.api_key_file.as_ref().map_or_else(
            || infrastructure::get_config_dir().join(infrastructure::API_KEY_FILE),
            infrastructure::expand_tilde,
        )
    }

    #[must_use]
    pub fn favorites_path(&self) -> PathBuf {
        self.favorites_file.as_ref().map_or_else(
            || infrastructure::get_data_dir().join(FAVORITES_FILE),
            infrastructure::expand_tilde,
        )
    }

    #[must_use]
    pub fn theme_path(&self) -> Option<PathBuf> {
        self.theme_file.as_ref().map(infrastructure::expand_tilde)
    }

    /// Fetch timeout. Zero is treated as the default.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }
}

/// Builds the initial state for `keyword`.
///
/// An unusable theme falls back to the default and is logged.
#[must_use]
pub fn initialize(config: &Config, keyword: &str) -> AppState {
    tracing::debug!(keyword, "initializing gourmet");

    let theme_path = config.theme_path();
    let theme = Theme::resolve(config.theme.as_deref(), theme_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    AppState::new(keyword, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.search_on_start);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoint(), api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://127.0.0.1:9/\"\nrequest_timeout_secs = 3\notlp_export = true\nfavorites_file = \"/tmp/favs.json\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.endpoint(), "http://127.0.0.1:9/");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert!(config.otlp_export);
        assert!(config.search_on_start);
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/favs.json"));
    }

    #[test]
    fn unknown_key_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theem = \"catppuccin-latte\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(GourmetError::Config(_))));
    }

    #[test]
    fn zero_timeout_uses_default() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn bad_theme_falls_back() {
        let config = Config {
            theme: Some("solarized".to_string()),
            ..Config::default()
        };
        let state = initialize(&config, "sushi");
        assert_eq!(state.theme.name, ui::theme::DEFAULT_THEME);
        assert_eq!(state.query.keyword(), "sushi");
    }
}
