use super::resource::{CreatePolicy, Resource};
use crate::models::{PageShape, Tag, TagDraft};

/// `/tags`, `{success, message, data: [...]}` with every tag at once, Mongo-style `_id`
pub struct Tags;

impl Resource for Tags {
    type Id = String;
    type Record = Tag;
    type Draft = TagDraft;
    type Scope = ();

    const SINGULAR: &'static str = "Tag";
    const PLURAL: &'static str = "tags";
    const PAGE_SHAPE: PageShape = PageShape::Whole;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Prepend;

    fn collection_path(_: &()) -> String {
        "/tags".to_string()
    }

    fn item_path(_: &(), id: &String) -> String {
        format!("/tags/{}", id)
    }

    fn record_id(record: &Tag) -> String {
        record.id.clone()
    }
}
