// ============================================================================
// APP STATE - Every store of the dashboard, built once at startup
// ============================================================================
// All stores share one ApiClient (and so one token vault) and one
// notification feed. Clones are cheap handles onto the same state.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::routing::RouteGuard;
use crate::services::{ApiClient, AuthApi, HttpTransport};
use crate::state::TokenVault;
use crate::stores::{
    ArticleStore, CategoryStore, EntityStore, NotificationStore, PackageKeyStore, PackageStore,
    SessionStore, TagStore, UserStore,
};
use crate::utils::KeyValueStorage;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionStore,
    pub notifications: NotificationStore,
    pub articles: ArticleStore,
    pub categories: CategoryStore,
    pub tags: TagStore,
    pub users: UserStore,
    pub packages: PackageStore,
    pub package_keys: PackageKeyStore,
    pub guard: RouteGuard,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        storage: Rc<dyn KeyValueStorage>,
        transport: Rc<dyn HttpTransport>,
    ) -> Self {
        let vault = Rc::new(TokenVault::load(storage));
        let client = ApiClient::new(&config.api_base_url, transport, vault.clone());
        let notifications = NotificationStore::new();
        let page_size = config.default_page_size;

        let session = SessionStore::new(vault, AuthApi::new(client.clone()));
        log::info!("🚀 Admin context ready ({})", client.base_url());

        Self {
            guard: RouteGuard::new(session.clone()),
            session,
            articles: EntityStore::new(client.clone(), notifications.clone(), page_size),
            categories: EntityStore::new(client.clone(), notifications.clone(), page_size),
            tags: EntityStore::new(client.clone(), notifications.clone(), page_size),
            users: EntityStore::new(client.clone(), notifications.clone(), page_size),
            packages: EntityStore::new(client.clone(), notifications.clone(), page_size),
            package_keys: PackageKeyStore::new(client, notifications.clone(), page_size),
            notifications,
            config,
        }
    }

    /// Browser wiring: localStorage plus fetch
    #[cfg(target_arch = "wasm32")]
    pub fn browser(config: AppConfig) -> Self {
        use crate::services::GlooTransport;
        use crate::utils::BrowserStorage;

        Self::new(config, Rc::new(BrowserStorage), Rc::new(GlooTransport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::error::ApiError;
    use crate::models::{CategoryDraft, NotificationKind, TagDraft};
    use crate::routing::{Navigation, Route};
    use crate::services::HttpMethod;
    use crate::testing::{block_on, FakeBackend};
    use crate::utils::{MemoryStorage, STORAGE_KEY_ACCESS_TOKEN};

    fn context(backend: &Rc<FakeBackend>) -> AppContext {
        let config = AppConfig::default().with_base_url("http://api.test/");
        AppContext::new(config, Rc::new(MemoryStorage::new()), backend.clone())
    }

    fn log_in(backend: &FakeBackend, app: &AppContext) {
        backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": true, "data": {"token": "T"}}),
        );
        backend.respond(
            HttpMethod::Get,
            "/v1/auth/me",
            200,
            json!({"success": true, "data": {"email": "a@b.com"}}),
        );
        block_on(app.session.login("a@b.com", "x")).unwrap();
    }

    #[test]
    fn stored_token_holds_navigation_until_checked() {
        let backend = FakeBackend::new();
        backend.respond(
            HttpMethod::Get,
            "/v1/auth/me",
            200,
            json!({"success": true, "data": {"email": "a@b.com"}}),
        );
        let storage = Rc::new(MemoryStorage::with_entry(STORAGE_KEY_ACCESS_TOKEN, "T"));
        let app = AppContext::new(AppConfig::default(), storage, backend.clone());

        assert_eq!(app.guard.resolve(Route::Articles), Navigation::Pending);

        block_on(app.session.fetch_profile()).unwrap();
        assert_eq!(app.guard.resolve(Route::Articles), Navigation::Allow);
    }

    #[test]
    fn stores_use_the_session_token() {
        let backend = FakeBackend::new();
        let app = context(&backend);
        log_in(&backend, &app);
        backend.respond(HttpMethod::Get, "/tags", 200, json!({"success": true, "data": []}));

        block_on(app.tags.fetch_list(1, 0, None));

        let request = backend.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/tags");
        assert_eq!(request.header("Authorization"), Some("Bearer T"));
        assert_eq!(request.query_param("pageSize"), Some("10"));
    }

    #[test]
    fn mutations_after_logout_never_reach_the_network() {
        let backend = FakeBackend::new();
        let app = context(&backend);
        log_in(&backend, &app);
        app.session.logout();
        let sent = backend.request_count();

        let err = block_on(app.tags.create(&TagDraft {
            name: "rust".to_string(),
            ..TagDraft::default()
        }))
        .unwrap_err();
        assert_eq!(err, ApiError::MissingCredentials);
        assert_eq!(
            block_on(app.categories.delete(&3)),
            Err(ApiError::MissingCredentials)
        );
        assert_eq!(backend.request_count(), sent);
    }

    #[test]
    fn create_then_fetch_shows_one_matching_record() {
        let backend = FakeBackend::new();
        let app = context(&backend);
        log_in(&backend, &app);
        backend.respond(
            HttpMethod::Get,
            "/admin/categories",
            200,
            json!({"result": true, "data": {
                "items": [{"id": 41, "name": "Business", "slug": "business"}],
                "page": 1, "pageSize": 10, "totalItems": 1, "totalPages": 1
            }}),
        );
        backend.respond(
            HttpMethod::Post,
            "/admin/categories",
            201,
            json!({"result": true, "msg": "Created", "data": {"id": 41, "name": "Business"}}),
        );

        block_on(app.categories.create(&CategoryDraft {
            name: "Business".to_string(),
            description: None,
        }))
        .unwrap();
        block_on(app.categories.fetch_list(1, 10, None));

        let matching = app
            .categories
            .items()
            .into_iter()
            .filter(|c| c.name == "Business")
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn entity_feedback_lands_in_the_shared_feed() {
        let backend = FakeBackend::new();
        let app = context(&backend);
        log_in(&backend, &app);
        backend.respond(HttpMethod::Get, "/admin/packages", 500, json!({"status": false}));

        block_on(app.packages.fetch_list(1, 10, None));

        let feed = app.notifications.notifications();
        assert_eq!(feed[0].kind, NotificationKind::Error);
        assert_eq!(feed[0].message, "Failed to fetch packages");
        assert_eq!(app.notifications.unread_count(), 1);
    }
}
