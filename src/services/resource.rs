// ============================================================================
// RESOURCE - Per-entity endpoint contract
// ============================================================================
// One implementation per endpoint family. It pins down paths, the list
// payload shape, the identifier and what happens after a create. The
// generic EntityStore only talks to the backend through this trait.
// ============================================================================

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::api_client::encode;
use super::http_client::HttpMethod;
use crate::error::ApiResult;
use crate::models::PageShape;

/// What a successful create does to the local collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePolicy {
    /// Insert the returned record at the front
    Prepend,
    /// Reload the current page
    Refetch,
}

pub trait Resource: 'static {
    type Id: Clone + PartialEq + fmt::Display + fmt::Debug;
    type Record: Clone + fmt::Debug + Serialize + DeserializeOwned;
    type Draft: Serialize;
    /// Parent the collection lives under (`()` for top-level collections)
    type Scope: Clone + PartialEq + fmt::Debug;

    /// Capitalized, used in user-facing messages ("Article")
    const SINGULAR: &'static str;
    /// Lowercase plural ("articles")
    const PLURAL: &'static str;
    /// Query parameter carrying the search text; `None` when unsupported
    const FILTER_PARAM: Option<&'static str> = Some("q");
    const PAGE_SHAPE: PageShape;
    const CREATE_POLICY: CreatePolicy;
    const UPDATE_METHOD: HttpMethod = HttpMethod::Put;

    fn collection_path(scope: &Self::Scope) -> String;

    fn create_path(scope: &Self::Scope) -> String {
        Self::collection_path(scope)
    }

    fn item_path(scope: &Self::Scope, id: &Self::Id) -> String;

    fn record_id(record: &Self::Record) -> Self::Id;

    fn create_body(_scope: &Self::Scope, draft: &Self::Draft) -> ApiResult<Value> {
        encode(draft)
    }
}
