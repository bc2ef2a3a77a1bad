//! Browser `localStorage` backend.

use crate::{CacheError, KvStore};

/// [`KvStore`] backed by the page origin's `localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// Open the current window's `localStorage`.
    pub fn open() -> Result<Self, CacheError> {
        let window = web_sys::window()
            .ok_or_else(|| CacheError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KvStore for LocalStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }
}
