//! Bearer token persistence. The store holds at most one opaque token per
//! storage key; absence means unauthenticated. The token is never parsed or
//! validated here, and writes are whole-value, so last-writer-wins is
//! sufficient.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::DEFAULT_STORAGE_KEY;

/// Key-value storage capability. The browser implementation wraps
/// `localStorage`; [`MemoryStorage`] backs tests and non-browser hosts.
pub trait TokenStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

impl<S: TokenStorage + ?Sized> TokenStorage for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key);
    }
}

/// Single-token store namespaced by a configurable key.
pub struct SessionStore<S> {
    key: String,
    storage: S,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Builds a store under the default key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Builds a store under a deployment-specific key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            storage,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get_item(&self.key)
    }

    pub fn set(&self, token: &str) {
        self.storage.set_item(&self.key, token);
    }

    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
    }
}

/// In-memory storage for tests and non-browser hosts.
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `localStorage`-backed storage. Reads and writes are best-effort: a
/// browser that denies storage access behaves as an always-empty store.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(target_arch = "wasm32")]
impl TokenStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(key).ok())
            .flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
        {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(key);
        }
    }
}
