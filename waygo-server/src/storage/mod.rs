//! Local persistence for favourites, session and theme.
//!
//! Values are stored as JSON strings under fixed keys. A key that was never
//! written (or holds `null`) reads as "nothing stored".

mod error;
mod kv;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Session;
use crate::domain::FavoritesList;
use crate::theme::ThemeMode;

pub use error::StorageError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};

const FAVORITES_KEY: &str = "favorites";
const SESSION_KEY: &str = "auth";
const THEME_KEY: &str = "theme";

/// Typed access to the app's persisted values.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        let value: Option<T> = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(value)
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        debug!(key, bytes = raw.len(), "saving");
        self.backend.set(key, &raw)
    }

    /// Saved favourites, or an empty list.
    pub fn load_favorites(&self) -> Result<FavoritesList, StorageError> {
        Ok(self.load(FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn save_favorites(&self, favorites: &FavoritesList) -> Result<(), StorageError> {
        self.save(FAVORITES_KEY, favorites)
    }

    pub fn load_session(&self) -> Result<Option<Session>, StorageError> {
        self.load(SESSION_KEY)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        self.save(SESSION_KEY, session)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.backend.remove(SESSION_KEY)
    }

    pub fn load_theme(&self) -> Result<Option<ThemeMode>, StorageError> {
        self.load(THEME_KEY)
    }

    pub fn save_theme(&self, mode: ThemeMode) -> Result<(), StorageError> {
        self.save(THEME_KEY, &mode)
    }
}
