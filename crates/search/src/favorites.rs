//! Favorited asset identifiers, persisted across sessions.
//!
//! The whole list is stored as one JSON array under
//! [`FAVORITES_STORAGE_KEY`] in a key-value store. No size bound.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use scout_core::asset::Asset;
use serde_json::Value;

/// Durable key holding the favorites list.
pub const FAVORITES_STORAGE_KEY: &str = "iconscout_favorites";

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Favorites storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites storage is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not move favorites into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Minimal durable key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, FavoritesError>;
    fn set(&mut self, key: &str, value: Value) -> Result<(), FavoritesError>;
}

/// Volatile store, for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, FavoritesError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), FavoritesError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk, one member per key.
///
/// Each write goes to its own uniquely named temp file in the same
/// directory and is renamed into place, so concurrent writers never share a
/// partial file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<serde_json::Map<String, Value>, FavoritesError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(serde_json::Map::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, FavoritesError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), FavoritesError> {
        let mut document = self.read_document().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Replacing unreadable storage file");
            serde_json::Map::new()
        });
        document.insert(key.to_string(), value);

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;
        drop(writer);
        temp_file.persist(&self.path)?;
        Ok(())
    }
}

/// Set of favorited asset uuids, in the order they were added.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    uuids: Vec<String>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites from `store`. Missing or unreadable data starts empty.
    pub fn open(store: S) -> Self {
        let uuids = match store.get(FAVORITES_STORAGE_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring malformed favorites list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read favorites, starting empty");
                Vec::new()
            }
        };
        Self { store, uuids }
    }

    pub fn is_favorite(&self, asset_uuid: &str) -> bool {
        self.uuids.iter().any(|u| u == asset_uuid)
    }

    /// Add the asset if absent, remove it otherwise. Returns whether it is
    /// a favorite afterwards. Nothing changes if persisting fails.
    pub fn toggle(&mut self, asset: &Asset) -> Result<bool, FavoritesError> {
        let now_favorite = !self.is_favorite(&asset.uuid);
        let next: Vec<String> = if now_favorite {
            self.uuids.iter().cloned().chain([asset.uuid.clone()]).collect()
        } else {
            self.uuids.iter().filter(|u| **u != asset.uuid).cloned().collect()
        };

        self.store.set(FAVORITES_STORAGE_KEY, serde_json::to_value(&next)?)?;
        self.uuids = next;
        tracing::debug!(asset_uuid = %asset.uuid, now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }

    pub fn count(&self) -> usize {
        self.uuids.len()
    }

    pub fn list(&self) -> &[String] {
        &self.uuids
    }
}
