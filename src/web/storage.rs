//! SessionStorage wrapper.
//!
//! Thin wrapper over `web_sys::Storage`, scoped to the tab's session store.
//! Session credentials deliberately live in `sessionStorage` rather than
//! `localStorage`: they must not outlive the browsing session.

/// Session-scoped key/value store.
pub struct SessionStore;

impl SessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    /// Read a stored string value.
    ///
    /// Returns `None` if the key is absent or storage is unavailable.
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// Store a value. Returns `true` on success.
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// Remove a key. Returns `true` on success.
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
