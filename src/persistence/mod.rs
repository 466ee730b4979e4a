//! Key/value persistence for scores and settings
//!
//! Backends:
//! - `MemoryStorage`: in-process, for tests and headless runs
//! - `FileStorage`: one JSON file per key in a directory (native)
//! - `LocalStorage`: browser LocalStorage (wasm32)

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// String key/value store that survives the process (except `MemoryStorage`)
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read and decode a JSON value; `Ok(None)` when the key is absent
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and store a JSON value
pub fn save_json<T: Serialize + ?Sized>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
