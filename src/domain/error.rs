//! Error types for gourmet.
//!
//! [`GourmetError`] is the crate-wide error and [`Result`] its alias. Fetch
//! failures have their own [`FetchError`] because they are recovered locally
//! (the result list is cleared) and travel inside events, so they must be
//! cheap to clone and compare.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gourmet operations.
#[derive(Debug, Error)]
pub enum GourmetError {
    /// Configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API key file is missing or malformed.
    ///
    /// Fatal at startup: no request can be made without a key.
    #[error("Credentials error ({}): {reason}", path.display())]
    Credentials { path: PathBuf, reason: String },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing the favorites file failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A favorite with this id is already stored.
    #[error("shop {id} is already a favorite")]
    FavoriteExists { id: String },

    /// No favorite with this id is stored.
    #[error("shop {id} is not a favorite")]
    FavoriteNotFound { id: String },

    /// Fetching a page of results failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The fetch worker could not be started or reached.
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Why a page fetch failed.
///
/// Carries strings rather than source errors so it can be cloned into events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, TLS or body transfer failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The API returned an error payload.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,
}

/// A specialized `Result` type for gourmet operations.
pub type Result<T> = std::result::Result<T, GourmetError>;
