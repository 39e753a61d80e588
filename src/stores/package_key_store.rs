// ============================================================================
// PACKAGE KEY STORE - License keys of the package being managed
// ============================================================================
// Same collection mechanics as every other entity, scoped to one parent
// package. Without a parent id the store does nothing and sends nothing.
// ============================================================================

use crate::error::ApiResult;
use crate::models::{PackageKey, PackageKeyDraft, Pagination};
use crate::services::{ApiClient, PackageKeys};
use crate::state::SubscriptionId;
use crate::stores::{EntityState, EntityStore, NotificationStore};

#[derive(Clone)]
pub struct PackageKeyStore {
    keys: EntityStore<PackageKeys>,
}

fn parent_id(package_id: Option<&str>) -> Option<String> {
    package_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

impl PackageKeyStore {
    pub fn new(client: ApiClient, notifications: NotificationStore, default_page_size: u32) -> Self {
        Self {
            keys: EntityStore::new(client, notifications, default_page_size),
        }
    }

    /// Package whose keys are currently loaded
    pub fn package_id(&self) -> Option<String> {
        self.keys.current_scope()
    }

    /// Loads one page of keys for `package_id`. A missing or blank id is a no-op.
    pub async fn fetch_list(&self, package_id: Option<&str>, page: u32, page_size: u32) {
        let Some(package_id) = parent_id(package_id) else {
            log::warn!("⚠️ No package selected, keys not fetched");
            return;
        };
        self.keys.fetch_in(&package_id, page, page_size, None).await
    }

    /// Reloads the current page of the current package
    pub async fn refresh(&self) {
        if let Some(package_id) = self.package_id() {
            self.keys.refetch_in(&package_id).await
        }
    }

    /// Adds a key to `package_id`. `Ok(None)` without a parent id.
    pub async fn create(
        &self,
        package_id: Option<&str>,
        draft: &PackageKeyDraft,
    ) -> ApiResult<Option<PackageKey>> {
        match parent_id(package_id) {
            Some(package_id) => self.keys.create_in(&package_id, draft).await,
            None => {
                log::warn!("⚠️ No package selected, key not created");
                Ok(None)
            }
        }
    }

    /// `Ok(None)` without a parent id
    pub async fn update(
        &self,
        package_id: Option<&str>,
        key_id: &str,
        draft: &PackageKeyDraft,
    ) -> ApiResult<Option<PackageKey>> {
        match parent_id(package_id) {
            Some(package_id) => {
                self.keys
                    .update_in(&package_id, &key_id.to_string(), draft)
                    .await
            }
            None => {
                log::warn!("⚠️ No package selected, key {} not updated", key_id);
                Ok(None)
            }
        }
    }

    /// `Ok(true)` once the key is gone, `Ok(false)` without a parent id.
    /// The follow-up reload stays on `package_id`.
    pub async fn delete(&self, package_id: Option<&str>, key_id: &str) -> ApiResult<bool> {
        let Some(package_id) = parent_id(package_id) else {
            log::warn!("⚠️ No package selected, key {} not deleted", key_id);
            return Ok(false);
        };
        self.keys.delete_in(&package_id, &key_id.to_string()).await?;
        Ok(true)
    }

    pub fn keys(&self) -> Vec<PackageKey> {
        self.keys.items()
    }

    pub fn find(&self, key_id: &str) -> Option<PackageKey> {
        self.keys.find(&key_id.to_string())
    }

    pub fn pagination(&self) -> Pagination {
        self.keys.pagination()
    }

    pub fn is_loading(&self) -> bool {
        self.keys.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.keys.error()
    }

    pub fn snapshot(&self) -> EntityState<PackageKey> {
        self.keys.snapshot()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.keys.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.keys.unsubscribe(id)
    }
}
