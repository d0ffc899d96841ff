//! JSON file-based favorites store.
//!
//! The whole store is held in memory and rewritten on every mutation using an
//! atomic write (write to a temp file, then rename over the target), so a
//! crash mid-write leaves the previous file intact.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "favorites": {
//!     "J001246910": {
//!       "id": "J001246910",
//!       "name": "Ramen Taro",
//!       "logo_image": "https://imgfp.hotp.jp/logo.jpg",
//!       "address": "Tokyo, Shibuya 1-2-3",
//!       "coupon_url": "https://hotpepper.jp/strJ001246910/map/",
//!       "created_at": 1734567890
//!     }
//!   }
//! }
//! ```

use crate::domain::error::{GourmetError, Result};
use crate::storage::backend::FavoritesStore;
use crate::storage::models::FavoriteRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    /// Favorites indexed by shop id.
    #[serde(default)]
    favorites: HashMap<String, FavoriteRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            favorites: HashMap::new(),
        }
    }
}

/// Favorites persisted as a single JSON file.
///
/// Single process, single writer. The store is owned by the UI thread.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonStorage {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file is an empty store; it is created on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but cannot be read or is not valid JSON
    /// - The file was written by a newer, unknown format version
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing favorites storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no favorites file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(favorite_count = data.favorites.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| GourmetError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        if data.version > STORAGE_VERSION {
            return Err(GourmetError::Storage(format!(
                "unsupported favorites format version {}",
                data.version
            )));
        }

        Ok(data)
    }

    /// Writes the in-memory store atomically.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| GourmetError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(favorite_count = self.data.favorites.len(), "favorites saved");
        Ok(())
    }
}

impl FavoritesStore for JsonStorage {
    fn is_favorite(&self, id: &str) -> bool {
        self.data.favorites.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<FavoriteRecord> {
        self.data.favorites.get(id).cloned()
    }

    fn list(&self) -> Vec<FavoriteRecord> {
        let mut records: Vec<FavoriteRecord> = self.data.favorites.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }

    fn add(&mut self, record: FavoriteRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_add_favorite", shop_id = %record.id).entered();

        if self.data.favorites.contains_key(&record.id) {
            return Err(GourmetError::FavoriteExists { id: record.id });
        }

        let id = record.id.clone();
        self.data.favorites.insert(id.clone(), record);

        if let Err(e) = self.save_to_file() {
            self.data.favorites.remove(&id);
            return Err(e);
        }

        tracing::debug!("favorite added");
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<FavoriteRecord> {
        let _span = tracing::debug_span!("json_remove_favorite", shop_id = %id).entered();

        let record = self
            .data
            .favorites
            .remove(id)
            .ok_or_else(|| GourmetError::FavoriteNotFound { id: id.to_string() })?;

        if let Err(e) = self.save_to_file() {
            self.data.favorites.insert(id.to_string(), record);
            return Err(e);
        }

        tracing::debug!("favorite removed");
        Ok(record)
    }
}
