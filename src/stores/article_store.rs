// ============================================================================
// ARTICLE STORE - Articles plus the publish/archive workflow
// ============================================================================

use crate::error::ApiResult;
use crate::models::{Article, ArticleStatus, ArticleStatusChange};
use crate::services::api_client::encode;
use crate::services::{Articles, HttpMethod};
use crate::stores::EntityStore;

pub type ArticleStore = EntityStore<Articles>;

impl EntityStore<Articles> {
    /// PATCH `/admin/articles/{id}/status`. The cached article is swapped
    /// for the returned one, or gets the new status when nothing comes back.
    pub async fn update_status(
        &self,
        id: &str,
        status: ArticleStatus,
    ) -> ApiResult<Option<Article>> {
        log::info!("📝 Article {} -> {:?}", id, status);
        let body = encode(&ArticleStatusChange { status })?;
        self.apply_change(
            &(),
            &id.to_string(),
            HttpMethod::Patch,
            &Articles::status_path(id),
            body,
            "Article status updated successfully",
            "Failed to update article status",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use crate::error::ApiError;
    use crate::models::ArticleDraft;
    use crate::services::ApiClient;
    use crate::stores::NotificationStore;
    use crate::testing::{block_on, FakeBackend, StaticToken};

    fn articles(backend: &Rc<FakeBackend>, token: Option<&str>) -> ArticleStore {
        let client = ApiClient::new(
            "http://api.test/",
            backend.clone(),
            Rc::new(StaticToken(token.map(str::to_string))),
        );
        EntityStore::new(client, NotificationStore::new(), 10)
    }

    fn seed(backend: &FakeBackend) {
        backend.respond(
            HttpMethod::Get,
            "/admin/articles",
            200,
            json!({
                "result": true,
                "data": {
                    "items": [
                        {"id": "a1", "title": "First", "status": "draft"},
                        {"id": "a2", "title": "Second", "status": "draft"}
                    ],
                    "page": 1, "pageSize": 10, "totalItems": 2, "totalPages": 1
                }
            }),
        );
    }

    #[test]
    fn filter_goes_out_as_title() {
        let backend = FakeBackend::new();
        seed(&backend);
        let store = articles(&backend, Some("T"));

        block_on(store.fetch_list(1, 10, Some("rust")));
        let request = backend.last_request().unwrap();
        assert_eq!(request.query_param("title"), Some("rust"));
        assert_eq!(request.query_param("q"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn status_change_without_body_patches_cached_record() {
        let backend = FakeBackend::new();
        seed(&backend);
        backend.respond(
            HttpMethod::Patch,
            "/admin/articles/a2/status",
            200,
            json!({"result": true, "msg": "Status updated"}),
        );
        let store = articles(&backend, Some("T"));

        block_on(store.fetch_list(1, 10, None));
        let updated = block_on(store.update_status("a2", ArticleStatus::Published))
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, Some(ArticleStatus::Published));
        let ids: Vec<String> = store.items().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(
            store.find(&"a2".to_string()).unwrap().status,
            Some(ArticleStatus::Published)
        );
        assert_eq!(
            backend.last_request().unwrap().body,
            Some(json!({"status": "published"}))
        );
    }

    #[test]
    fn update_with_unmergeable_fields_reloads_the_page() {
        let backend = FakeBackend::new();
        let page = |title: &str, category: Value| {
            json!({
                "result": true,
                "data": {
                    "items": [{"id": "a1", "title": title, "category": category, "source": {"name": "Wire"}}],
                    "page": 1, "pageSize": 10, "totalItems": 1, "totalPages": 1
                }
            })
        };
        backend.respond(HttpMethod::Get, "/admin/articles", 200, page("Old", json!({"id": 1, "name": "Tech"})));
        backend.respond(HttpMethod::Get, "/admin/articles", 200, page("New", json!({"id": 2, "name": "Travel"})));
        backend.respond(HttpMethod::Put, "/admin/articles/a1", 200, json!({"result": true}));
        let store = articles(&backend, Some("T"));

        block_on(store.fetch_list(1, 10, None));
        // The form sends the category as a bare id, the list holds an object
        let updated = block_on(store.update(
            &"a1".to_string(),
            &ArticleDraft {
                title: "New".to_string(),
                category: Some(json!(2)),
                source: Some("Reuters".to_string()),
                ..ArticleDraft::default()
            },
        ))
        .unwrap()
        .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.category.map(|c| c.name), Some("Travel".to_string()));
        assert_eq!(store.find(&"a1".to_string()).unwrap().title, "New");
        assert_eq!(backend.count(HttpMethod::Get, "/admin/articles"), 2);
        assert!(!store.is_loading());
    }

    #[test]
    fn failed_status_change_keeps_status() {
        let backend = FakeBackend::new();
        seed(&backend);
        backend.respond(
            HttpMethod::Patch,
            "/admin/articles/a1/status",
            400,
            json!({"result": false, "msg": "Cannot publish without content"}),
        );
        let store = articles(&backend, Some("T"));

        block_on(store.fetch_list(1, 10, None));
        let err = block_on(store.update_status("a1", ArticleStatus::Published)).unwrap_err();

        assert_eq!(err, ApiError::http(400, Some("Cannot publish without content".to_string())));
        assert_eq!(store.items()[0].status, Some(ArticleStatus::Draft));
        assert_eq!(store.error().as_deref(), Some("Cannot publish without content"));
        assert!(!store.is_loading());
    }
}
