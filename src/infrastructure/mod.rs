//! Infrastructure layer for filesystem and environment interactions.
//!
//! - [`paths`]: platform config/data directories and tilde expansion
//! - [`credentials`]: API key file loading
//! - [`browser`]: launching the external browser

pub mod browser;
pub mod credentials;
pub mod paths;

pub use browser::open_url;
pub use credentials::{load_api_key, ApiKey, API_KEY_FILE};
pub use paths::{expand_tilde, get_config_dir, get_data_dir};
