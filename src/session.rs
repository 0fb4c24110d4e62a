//! Explicit session handling. The bearer token lives in `AppState` and is
//! persisted through the `TokenStore` trait rather than read ad hoc from
//! browser storage by whichever module needs it.

use wasm_bindgen::JsValue;

use crate::constants::TOKEN_STORAGE_KEY;

/// Authentication state carried inside `AppState` and passed explicitly to
/// the API client.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: String) -> Self {
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
    }
}

/// Persistence seam for the session token. Production uses browser
/// localStorage; tests can substitute an in-memory store.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `TokenStore` over `window.localStorage` under a fixed key. Storage
/// failures (private browsing, quota) are logged and otherwise ignored —
/// the session then simply does not survive a reload.
pub struct BrowserTokenStore;

impl BrowserTokenStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        self.storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(TOKEN_STORAGE_KEY, token) {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "Failed to persist session token: {:?}",
                    e
                )));
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::TokenStore;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct MemoryTokenStore {
        token: RefCell<Option<String>>,
    }

    impl TokenStore for MemoryTokenStore {
        fn load(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        fn save(&self, token: &str) {
            *self.token.borrow_mut() = Some(token.to_string());
        }

        fn clear(&self) {
            *self.token.borrow_mut() = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryTokenStore;
    use super::*;

    #[test]
    fn session_round_trips_through_store() {
        let store = MemoryTokenStore::default();
        assert!(store.load().is_none());

        store.save("abc");
        let session = match store.load() {
            Some(token) => Session::with_token(token),
            None => Session::anonymous(),
        };
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));

        store.clear();
        assert!(store.load().is_none());
    }
}
