use serde_json::Value;

use super::api_client::encode;
use super::resource::{CreatePolicy, Resource};
use crate::error::{ApiError, ApiResult};
use crate::models::{Package, PackageDraft, PackageKey, PackageKeyDraft, PageShape};

/// `/admin/packages`, `{status, data: {data, pagination}}`
pub struct Packages;

impl Resource for Packages {
    type Id = String;
    type Record = Package;
    type Draft = PackageDraft;
    type Scope = ();

    const SINGULAR: &'static str = "Package";
    const PLURAL: &'static str = "packages";
    const PAGE_SHAPE: PageShape = PageShape::Nested;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Refetch;

    fn collection_path(_: &()) -> String {
        "/admin/packages".to_string()
    }

    fn item_path(_: &(), id: &String) -> String {
        format!("/admin/packages/{}", id)
    }

    fn record_id(record: &Package) -> String {
        record.id.clone()
    }
}

/// License keys of one package. Listing and creation are nested under the
/// package; single keys live at `/admin/keys/{id}`.
pub struct PackageKeys;

impl Resource for PackageKeys {
    type Id = String;
    type Record = PackageKey;
    type Draft = PackageKeyDraft;
    /// Parent package id
    type Scope = String;

    const SINGULAR: &'static str = "Key";
    const PLURAL: &'static str = "keys";
    const FILTER_PARAM: Option<&'static str> = None;
    const PAGE_SHAPE: PageShape = PageShape::Nested;
    const CREATE_POLICY: CreatePolicy = CreatePolicy::Refetch;

    fn collection_path(package_id: &String) -> String {
        format!("/admin/packages/{}/keys", package_id)
    }

    fn item_path(_: &String, id: &String) -> String {
        format!("/admin/keys/{}", id)
    }

    fn record_id(record: &PackageKey) -> String {
        record.id.clone()
    }

    fn create_body(package_id: &String, draft: &PackageKeyDraft) -> ApiResult<Value> {
        match encode(draft)? {
            Value::Object(mut body) => {
                body.insert("package_id".to_string(), Value::String(package_id.clone()));
                Ok(Value::Object(body))
            }
            _ => Err(ApiError::InvalidResponse(
                "key draft must serialize to an object".to_string(),
            )),
        }
    }
}
