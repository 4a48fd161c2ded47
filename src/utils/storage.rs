use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

/// Process-wide string store. In the browser this is `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
}

pub fn save_to_storage<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Failed to serialize {}: {}", key, e))?;
    store.set(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    serde_json::from_str(&json).ok()
}

/// In-memory store for non-browser hosts
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use web_sys::{window, Storage};

    /// `window.localStorage`
    #[derive(Default, Clone, Copy)]
    pub struct BrowserStorage;

    fn local_storage() -> Result<Storage, String> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage is not available".to_string())
    }

    impl KeyValueStore for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            local_storage().ok()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), String> {
            local_storage()?
                .set_item(key, value)
                .map_err(|_| format!("Failed to write {} to localStorage", key))
        }

        fn remove(&self, key: &str) -> Result<(), String> {
            local_storage()?
                .remove_item(key)
                .map_err(|_| format!("Failed to remove {} from localStorage", key))
        }
    }
}
