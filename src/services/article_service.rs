use super::resource::{CreatePolicy, Resource};
use crate::models::{Article, ArticleDraft, PageShape};

/// `/admin/articles`, `{result, msg, data: {items, page, ...}}`
pub struct Articles;

impl Articles {
    pub fn status_path(id: &str) -> String {
        format!("/admin/articles/{}/status", id)
    }
}

impl Resource for Articles {
    type Id = String;
    type Record = Article;
    type Draft = ArticleDraft;
    type Scope = ();

    const SINGULAR: &'static str = "Article";
    const PLURAL: &'static str = "articles";
    const FILTER_PARAM: Option<&'static str> = Some("title");
    const PAGE_SHAPE: PageShape = PageShape::Items;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Refetch;

    fn collection_path(_: &()) -> String {
        "/admin/articles".to_string()
    }

    fn item_path(_: &(), id: &String) -> String {
        format!("/admin/articles/{}", id)
    }

    fn record_id(record: &Article) -> String {
        record.id.clone()
    }
}
