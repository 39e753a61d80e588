use super::resource::{CreatePolicy, Resource};
use crate::models::{Category, CategoryDraft, PageShape};

/// `/admin/categories`, numeric ids
pub struct Categories;

impl Resource for Categories {
    type Id = u64;
    type Record = Category;
    type Draft = CategoryDraft;
    type Scope = ();

    const SINGULAR: &'static str = "Category";
    const PLURAL: &'static str = "categories";
    const PAGE_SHAPE: PageShape = PageShape::Items;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Refetch;

    fn collection_path(_: &()) -> String {
        "/admin/categories".to_string()
    }

    fn item_path(_: &(), id: &u64) -> String {
        format!("/admin/categories/{}", id)
    }

    fn record_id(record: &Category) -> u64 {
        record.id
    }
}
