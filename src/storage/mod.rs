//! Storage layer for favorite shops.
//!
//! # Modules
//!
//! - `backend`: the [`FavoritesStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `models`: on-disk record type, separate from the domain [`Shop`](crate::domain::Shop)

pub mod backend;
pub mod json;
pub mod models;

pub use backend::FavoritesStore;
pub use json::JsonStorage;
pub use models::FavoriteRecord;
