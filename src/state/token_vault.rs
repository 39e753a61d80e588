// ============================================================================
// TOKEN VAULT - Bearer tokens, persisted in client-local storage
// ============================================================================
// Readers (ApiClient) only see the TokenSource trait. The concrete vault is
// held by SessionStore, the single writer.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::{KeyValueStorage, STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN};

/// Read-only view of the current access token
pub trait TokenSource {
    fn access_token(&self) -> Option<String>;
}

pub struct TokenVault {
    storage: Rc<dyn KeyValueStorage>,
    access_token: RefCell<Option<String>>,
    refresh_token: RefCell<Option<String>>,
}

impl TokenVault {
    /// Loads whatever survived the last reload
    pub fn load(storage: Rc<dyn KeyValueStorage>) -> Self {
        let access_token = non_blank(storage.get(STORAGE_KEY_ACCESS_TOKEN));
        let refresh_token = non_blank(storage.get(STORAGE_KEY_REFRESH_TOKEN));
        if access_token.is_some() {
            log::info!("🔑 Access token found in storage");
        }
        Self {
            storage,
            access_token: RefCell::new(access_token),
            refresh_token: RefCell::new(refresh_token),
        }
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.refresh_token.borrow().clone()
    }

    pub(crate) fn store(&self, access_token: &str, refresh_token: Option<&str>) {
        *self.access_token.borrow_mut() = Some(access_token.to_string());
        if let Err(e) = self.storage.set(STORAGE_KEY_ACCESS_TOKEN, access_token) {
            log::error!("❌ Error persisting access token: {}", e);
        }

        if let Some(refresh) = refresh_token {
            *self.refresh_token.borrow_mut() = Some(refresh.to_string());
            if let Err(e) = self.storage.set(STORAGE_KEY_REFRESH_TOKEN, refresh) {
                log::error!("❌ Error persisting refresh token: {}", e);
            }
        }
    }

    /// Drops the access token only (rejected by the server)
    pub(crate) fn clear_access(&self) {
        *self.access_token.borrow_mut() = None;
        self.storage.remove(STORAGE_KEY_ACCESS_TOKEN);
    }

    pub(crate) fn clear_all(&self) {
        self.clear_access();
        *self.refresh_token.borrow_mut() = None;
        self.storage.remove(STORAGE_KEY_REFRESH_TOKEN);
    }
}

impl TokenSource for TokenVault {
    fn access_token(&self) -> Option<String> {
        self.access_token.borrow().clone()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
