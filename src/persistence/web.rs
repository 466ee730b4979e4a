//! Browser LocalStorage backend

use super::Storage;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - scores and settings will not persist");
        }
        Self { inner }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.inner.as_ref().ok_or(Error::StorageUnavailable)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|_| Error::StorageUnavailable)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| Error::StorageUnavailable)
    }
}
