// ============================================================================
// CLIENT-LOCAL STORAGE
// ============================================================================
// Key/value storage for the few things that must survive a reload (the
// bearer tokens). Browser builds use localStorage through gloo-storage;
// everything else (tests, non-browser hosts) uses MemoryStorage.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// In-process storage, lost when the process ends
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// window.localStorage, values stored raw (no JSON quoting)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| format!("Could not write '{}' to localStorage", key))
    }

    fn remove(&self, key: &str) {
        use gloo_storage::{LocalStorage, Storage};
        if LocalStorage::raw().remove_item(key).is_err() {
            log::warn!("⚠️ Could not remove '{}' from localStorage", key);
        }
    }
}
