use gloo_console::error;
use gloo_utils::window;
use keepup_lib::storage::SessionStore;
use web_sys::Storage;

/// `window.localStorage`. Browsers can refuse access (private mode, disabled
/// storage); reads then miss and writes are dropped with a console error.
#[derive(Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Option<Storage> {
        window().local_storage().ok().flatten()
    }
}

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            error!(format!("localStorage unavailable, dropping {key}"));
            return;
        };
        if storage.set_item(key, value).is_err() {
            error!(format!("Failed to write {key} to localStorage"));
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
