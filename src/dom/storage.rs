//! `localStorage`-backed [`PreferenceStore`].

use web_sys::{Storage, Window};

use crate::error::{Result, SiteError};
use crate::state::theme::{MemoryStore, PreferenceStore};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open(window: &Window) -> Result<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(SiteError::StorageUnavailable("localStorage disabled".into())),
            Err(err) => Err(SiteError::StorageUnavailable(format!("{err:?}"))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(|err| SiteError::StorageUnavailable(format!("{err:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(|err| SiteError::StorageUnavailable(format!("{err:?}")))
    }
}

/// `localStorage` when the browser allows it, a session-only map otherwise.
pub fn preference_store(window: &Window) -> Box<dyn PreferenceStore> {
    match LocalStorage::open(window) {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            log::warn!("{err}; theme preference will not persist");
            Box::new(MemoryStore::default())
        }
    }
}
