//! Browser-backed key-value stores: `localStorage` for the visitor profile,
//! `sessionStorage` for the admin token.

use gloo::storage::{LocalStorage, SessionStorage, Storage};
use parsa_core::{KeyValueStore, StorageError};

use crate::dom::js_error_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Survives reloads and browser restarts.
    Local,
    /// Cleared when the tab closes.
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserStore {
    area: StorageArea,
}

impl BrowserStore {
    #[must_use]
    pub const fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    #[must_use]
    pub const fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    #[must_use]
    pub const fn area(self) -> StorageArea {
        self.area
    }

    fn raw(self) -> web_sys::Storage {
        match self.area {
            StorageArea::Local => LocalStorage::raw(),
            StorageArea::Session => SessionStorage::raw(),
        }
    }
}

// Values are stored verbatim rather than through `Storage::get`/`set`, which
// would JSON-encode them a second time.
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.raw()
            .get_item(key)
            .map_err(|err| StorageError::Storage(js_error_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.raw()
            .set_item(key, value)
            .map_err(|err| StorageError::Storage(js_error_message(&err)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.area {
            StorageArea::Local => LocalStorage::delete(key),
            StorageArea::Session => SessionStorage::delete(key),
        }
        Ok(())
    }
}

/// Stored visitor profile; absent outside the browser.
#[must_use]
pub fn stored_profile() -> Option<parsa_core::UserInfo> {
    #[cfg(target_arch = "wasm32")]
    {
        parsa_core::load_profile(&BrowserStore::local())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Whether an admin token is held for this tab; always `false` outside the browser.
#[must_use]
pub fn has_admin_session() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        parsa_core::admin_token(&BrowserStore::session()).is_some()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_target_their_area() {
        assert_eq!(BrowserStore::local().area(), StorageArea::Local);
        assert_eq!(BrowserStore::session().area(), StorageArea::Session);
    }

    #[test]
    fn native_builds_start_without_profile_or_session() {
        assert!(stored_profile().is_none());
        assert!(!has_admin_session());
    }
}
