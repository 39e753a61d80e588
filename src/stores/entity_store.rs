// ============================================================================
// ENTITY STORE - One collection bound to its CRUD endpoints
// ============================================================================
// Generic over a Resource. Owns the cached page, loading/error flags and
// pagination. Every operation clears `loading` in its last step whatever
// the outcome. State is re-read after each await: overlapping calls are
// not serialized and the last completion wins.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{parse_page, window, Page, PageQuery, PageShape, Pagination};
use crate::services::api_client::{decode, encode};
use crate::services::{ApiClient, CreatePolicy, HttpMethod, Resource};
use crate::state::{StoreCell, SubscriptionId};
use crate::stores::NotificationStore;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Pagination,
    /// Filter of the last list request (already trimmed)
    pub filter: Option<String>,
}

impl<T> EntityState<T> {
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::first(page_size),
            filter: None,
        }
    }
}

pub struct EntityStore<R: Resource> {
    client: ApiClient,
    notifications: NotificationStore,
    state: StoreCell<EntityState<R::Record>>,
    scope: Rc<RefCell<Option<R::Scope>>>,
    default_page_size: u32,
}

impl<R: Resource> Clone for EntityStore<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            notifications: self.notifications.clone(),
            state: self.state.clone(),
            scope: self.scope.clone(),
            default_page_size: self.default_page_size,
        }
    }
}

/// Blank or whitespace-only filters mean "no filter"
pub fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}

impl<R: Resource> EntityStore<R> {
    pub fn new(client: ApiClient, notifications: NotificationStore, default_page_size: u32) -> Self {
        let default_page_size = default_page_size.max(1);
        Self {
            client,
            notifications,
            state: StoreCell::new(EntityState::new(default_page_size)),
            scope: Rc::new(RefCell::new(None)),
            default_page_size,
        }
    }

    // ------------------------------------------------------------------
    // Readers
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> EntityState<R::Record> {
        self.state.get()
    }

    pub fn items(&self) -> Vec<R::Record> {
        self.state.with(|s| s.items.clone())
    }

    pub fn len(&self) -> usize {
        self.state.with(|s| s.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &R::Id) -> Option<R::Record> {
        self.state
            .with(|s| s.items.iter().find(|r| R::record_id(r) == *id).cloned())
    }

    pub fn pagination(&self) -> Pagination {
        self.state.with(|s| s.pagination)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn filter(&self) -> Option<String> {
        self.state.with(|s| s.filter.clone())
    }

    pub(crate) fn current_scope(&self) -> Option<R::Scope> {
        self.scope.borrow().clone()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Scoped operations (the public API for `Scope = ()` is further down)
    // ------------------------------------------------------------------

    /// Replaces the whole collection with the requested page. Never fails:
    /// on error the collection is emptied and `error` is set.
    pub(crate) async fn fetch_in(
        &self,
        scope: &R::Scope,
        page: u32,
        page_size: u32,
        filter: Option<&str>,
    ) {
        let query = PageQuery::new(page, page_size, self.default_page_size);
        let filter = normalize_filter(filter);
        *self.scope.borrow_mut() = Some(scope.clone());

        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });

        match self.load_page(scope, query, filter.as_deref()).await {
            Ok(page) => {
                log::info!(
                    "✅ {} {} loaded (page {}/{})",
                    page.items.len(),
                    R::PLURAL,
                    page.pagination.current_page,
                    page.pagination.total_pages
                );
                self.state.update(|s| {
                    s.items = page.items;
                    s.pagination = page.pagination;
                    s.filter = filter;
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(e) => {
                let message = e.display_message(&format!("Failed to fetch {}", R::PLURAL));
                log::error!("❌ Error fetching {}: {}", R::PLURAL, e);
                self.notifications.error(message.clone());
                self.state.update(|s| {
                    s.items.clear();
                    s.filter = filter;
                    s.error = Some(message);
                    s.loading = false;
                });
            }
        }
    }

    async fn load_page(
        &self,
        scope: &R::Scope,
        query: PageQuery,
        filter: Option<&str>,
    ) -> ApiResult<Page<R::Record>> {
        if !self.client.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }

        let mut params = query.as_params();
        if let (Some(param), Some(text)) = (R::FILTER_PARAM, filter) {
            params.push((param.to_string(), text.to_string()));
        }

        let data = self.client.get(&R::collection_path(scope), &params).await?;
        let mut page: Page<R::Record> = parse_page(data, R::PAGE_SHAPE, query)?;

        let mut seen: Vec<R::Id> = Vec::with_capacity(page.items.len());
        page.items.retain(|record| {
            let id = R::record_id(record);
            if seen.contains(&id) {
                log::warn!("⚠️ Duplicate {} id {} dropped from page", R::SINGULAR, id);
                false
            } else {
                seen.push(id);
                true
            }
        });

        if R::PAGE_SHAPE == PageShape::Whole {
            page = window(page.items, query);
        }

        let limit = page.pagination.page_size.min(query.page_size) as usize;
        if page.items.len() > limit {
            log::warn!(
                "⚠️ Server sent {} {} for a page of {}, truncating",
                page.items.len(),
                R::PLURAL,
                limit
            );
            page.items.truncate(limit);
        }

        Ok(page)
    }

    /// Reloads the page currently shown for `scope` (first page when the
    /// store was showing another scope). Steps back when the current page
    /// disappeared, e.g. after deleting the last row of the last page.
    pub(crate) async fn refetch_in(&self, scope: &R::Scope) {
        let same_scope = self.current_scope().as_ref() == Some(scope);
        let (pagination, filter) = self.state.with(|s| (s.pagination, s.filter.clone()));
        let page = if same_scope { pagination.current_page } else { 1 };

        self.fetch_in(scope, page, pagination.page_size, filter.as_deref())
            .await;

        let (empty, total_pages, failed) =
            self.state
                .with(|s| (s.items.is_empty(), s.pagination.total_pages, s.error.is_some()));
        if empty && !failed && page > 1 && total_pages < page {
            self.fetch_in(scope, total_pages.max(1), pagination.page_size, filter.as_deref())
                .await;
        }
    }

    pub(crate) async fn create_in(
        &self,
        scope: &R::Scope,
        draft: &R::Draft,
    ) -> ApiResult<Option<R::Record>> {
        self.begin();
        let result = self.send_create(scope, draft).await;

        let outcome = match result {
            Ok(created) => {
                match (R::CREATE_POLICY, created.clone()) {
                    (CreatePolicy::Prepend, Some(record)) => {
                        let id = R::record_id(&record);
                        self.state.update(|s| {
                            let before = s.items.len();
                            s.items.retain(|r| R::record_id(r) != id);
                            let replaced = s.items.len() < before;
                            s.items.insert(0, record);
                            s.items.truncate(s.pagination.page_size as usize);
                            if !replaced {
                                let p = s.pagination;
                                let total_items = p.total_items + 1;
                                let total_pages = total_items.div_ceil(u64::from(p.page_size)) as u32;
                                s.pagination =
                                    Pagination::new(p.current_page, p.page_size, total_items, total_pages);
                            }
                        });
                    }
                    // Nothing usable came back: fall back to a reload
                    _ => self.refetch_in(scope).await,
                }
                log::info!("✅ {} created", R::SINGULAR);
                self.notifications
                    .success(format!("{} created successfully", R::SINGULAR));
                Ok(created)
            }
            Err(e) => Err(self.fail(e, &format!("Failed to add {}", R::SINGULAR.to_lowercase()))),
        };

        self.finish();
        outcome
    }

    async fn send_create(&self, scope: &R::Scope, draft: &R::Draft) -> ApiResult<Option<R::Record>> {
        if !self.client.has_credentials() {
            return Err(ApiError::MissingCredentials);
        }
        let body = R::create_body(scope, draft)?;
        let data = self
            .client
            .call(HttpMethod::Post, &R::create_path(scope), Some(body), &[])
            .await?;
        Ok(match data {
            Value::Null => None,
            other => decode(other).ok(),
        })
    }

    pub(crate) async fn update_in(
        &self,
        scope: &R::Scope,
        id: &R::Id,
        draft: &R::Draft,
    ) -> ApiResult<Option<R::Record>> {
        let body = match encode(draft) {
            Ok(body) => body,
            Err(e) => {
                return Err(self.fail(e, &format!("Failed to update {}", R::SINGULAR.to_lowercase())))
            }
        };
        self.apply_change(
            scope,
            id,
            R::UPDATE_METHOD,
            &R::item_path(scope, id),
            body,
            &format!("{} updated successfully", R::SINGULAR),
            &format!("Failed to update {}", R::SINGULAR.to_lowercase()),
        )
        .await
    }

    /// Sends a change for one record and swaps the result in place.
    /// When the server echoes nothing, the sent fields are merged into the
    /// cached record instead. If that merge does not yield a valid record
    /// the page is reloaded. Collection order never changes.
    pub(crate) async fn apply_change(
        &self,
        scope: &R::Scope,
        id: &R::Id,
        method: HttpMethod,
        path: &str,
        body: Value,
        success_message: &str,
        failure_message: &str,
    ) -> ApiResult<Option<R::Record>> {
        if !self.client.has_credentials() {
            return Err(self.fail(ApiError::MissingCredentials, failure_message));
        }

        self.begin();
        let result = self.client.call(method, path, Some(body.clone()), &[]).await;

        let outcome = match result {
            Ok(data) => {
                let returned: Option<R::Record> = match data {
                    Value::Null => None,
                    other => decode(other).ok(),
                };
                // Re-read after the await: the page may have been reloaded meanwhile
                let updated = returned.or_else(|| {
                    self.find(id)
                        .and_then(|current| merge_into::<R::Record>(&current, &body))
                });
                let updated = match updated {
                    Some(record) => {
                        self.state.update(|s| {
                            if let Some(slot) = s.items.iter_mut().find(|r| R::record_id(r) == *id) {
                                *slot = record.clone();
                            }
                        });
                        Some(record)
                    }
                    None => {
                        log::warn!("⚠️ No usable {} {} after update, reloading page", R::SINGULAR, id);
                        self.refetch_in(scope).await;
                        self.find(id)
                    }
                };
                log::info!("✅ {} {} updated", R::SINGULAR, id);
                self.notifications.success(success_message.to_string());
                Ok(updated)
            }
            Err(e) => Err(self.fail(e, failure_message)),
        };

        self.finish();
        outcome
    }

    pub(crate) async fn delete_in(&self, scope: &R::Scope, id: &R::Id) -> ApiResult<()> {
        let failure_message = format!("Failed to delete {}", R::SINGULAR.to_lowercase());
        if !self.client.has_credentials() {
            return Err(self.fail(ApiError::MissingCredentials, &failure_message));
        }

        self.begin();
        let result = self.client.delete(&R::item_path(scope, id)).await;

        let outcome = match result {
            Ok(_) => {
                self.remove_local(id);
                if R::CREATE_POLICY == CreatePolicy::Refetch {
                    self.refetch_in(scope).await;
                }
                log::info!("🗑️ {} {} deleted", R::SINGULAR, id);
                self.notifications
                    .success(format!("{} deleted successfully", R::SINGULAR));
                Ok(())
            }
            Err(e) => {
                // Already gone on the server: the cache must not keep it either
                if e.is_not_found() {
                    self.remove_local(id);
                }
                Err(self.fail(e, &failure_message))
            }
        };

        self.finish();
        outcome
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn remove_local(&self, id: &R::Id) {
        self.state.update(|s| {
            let before = s.items.len();
            s.items.retain(|r| R::record_id(r) != *id);
            if s.items.len() < before {
                s.pagination.total_items = s.pagination.total_items.saturating_sub(1);
            }
        });
    }

    fn begin(&self) {
        self.state.update(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn finish(&self) {
        self.state.update(|s| s.loading = false);
    }

    /// Records a failed mutation and hands the error back for re-throwing
    fn fail(&self, error: ApiError, fallback: &str) -> ApiError {
        let message = error.display_message(fallback);
        log::error!("❌ {}: {}", fallback, error);
        self.notifications.error(message.clone());
        self.state.update(|s| {
            s.error = Some(message);
            s.loading = false;
        });
        error
    }
}

/// Top-level collections
impl<R: Resource<Scope = ()>> EntityStore<R> {
    pub async fn fetch_list(&self, page: u32, page_size: u32, filter: Option<&str>) {
        self.fetch_in(&(), page, page_size, filter).await
    }

    /// Reloads the current page with the current filter
    pub async fn refresh(&self) {
        self.refetch_in(&()).await
    }

    pub async fn create(&self, draft: &R::Draft) -> ApiResult<Option<R::Record>> {
        self.create_in(&(), draft).await
    }

    pub async fn update(&self, id: &R::Id, draft: &R::Draft) -> ApiResult<Option<R::Record>> {
        self.update_in(&(), id, draft).await
    }

    pub async fn delete(&self, id: &R::Id) -> ApiResult<()> {
        self.delete_in(&(), id).await
    }
}

/// Overlays the non-null fields of `patch` onto `current`
fn merge_into<T>(current: &T, patch: &Value) -> Option<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let mut merged = serde_json::to_value(current).ok()?;
    if let (Value::Object(target), Value::Object(fields)) = (&mut merged, patch) {
        for (key, value) in fields {
            if !value.is_null() {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    serde_json::from_value(merged).ok()
}
