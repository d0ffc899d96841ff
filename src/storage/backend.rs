//! Favorites store abstraction.
//!
//! The trait is deliberately small: the UI and the CLI need membership checks,
//! a listing, and fail-fast add/remove. [`JsonStorage`](crate::storage::JsonStorage)
//! is the only persistent implementation.

use crate::domain::error::Result;
use crate::domain::Shop;
use crate::storage::models::FavoriteRecord;

/// Persistent mapping from shop id to [`FavoriteRecord`].
///
/// Mutations are all-or-nothing: when an implementation cannot persist a
/// change it must leave its visible state untouched and return the error.
///
/// # Examples
///
/// ```no_run
/// use gourmet::storage::{FavoritesStore, JsonStorage};
/// use std::path::PathBuf;
///
/// let store = JsonStorage::new(PathBuf::from("/tmp/favorites.json"))?;
/// println!("{} favorites", store.list().len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait FavoritesStore: Send {
    /// Whether a shop with this id is stored.
    fn is_favorite(&self, id: &str) -> bool;

    /// Looks up one favorite.
    fn get(&self, id: &str) -> Option<FavoriteRecord>;

    /// All favorites, newest first.
    fn list(&self) -> Vec<FavoriteRecord>;

    /// Stores a new favorite.
    ///
    /// # Errors
    ///
    /// - [`GourmetError::FavoriteExists`](crate::domain::GourmetError::FavoriteExists)
    ///   if the id is already stored
    /// - a storage or I/O error if the change cannot be persisted
    fn add(&mut self, record: FavoriteRecord) -> Result<()>;

    /// Removes a favorite and returns it.
    ///
    /// # Errors
    ///
    /// - [`GourmetError::FavoriteNotFound`](crate::domain::GourmetError::FavoriteNotFound)
    ///   if the id is not stored
    /// - a storage or I/O error if the change cannot be persisted
    fn remove(&mut self, id: &str) -> Result<FavoriteRecord>;

    /// Adds `shop` if it is not stored, otherwise removes it.
    ///
    /// Returns whether the shop is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying `add` or `remove`.
    fn toggle(&mut self, shop: &Shop) -> Result<bool> {
        if self.is_favorite(&shop.id) {
            self.remove(&shop.id)?;
            Ok(false)
        } else {
            self.add(FavoriteRecord::from_shop(shop))?;
            Ok(true)
        }
    }
}
