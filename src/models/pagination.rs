// ============================================================================
// PAGINATION - Page state and list payload normalization
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// What the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageQuery {
    /// `page == 0` becomes 1, `page_size == 0` becomes `default_size`
    pub fn new(page: u32, page_size: u32, default_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 { default_size.max(1) } else { page_size },
        }
    }

    pub fn as_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Keeps `1 <= current_page <= max(total_pages, 1)` and `page_size > 0`
    pub fn new(current_page: u32, page_size: u32, total_items: u64, total_pages: u32) -> Self {
        let ceiling = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, ceiling),
            page_size: page_size.max(1),
            total_items,
            total_pages,
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size, 0, 0)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

/// How an endpoint family lays out its list payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// `{ items, page, pageSize, totalItems, totalPages }`
    Items,
    /// `{ data: [...], pagination: { page, limit, total, totalPages } }`
    Nested,
    /// One server page as a bare array, without counts. The requested page
    /// is kept; a full page means another one may follow.
    Flat,
    /// The whole collection as a bare array, paged on the client
    Whole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageMeta {
    #[serde(default, alias = "current", deserialize_with = "lenient_u64")]
    page: Option<u64>,
    #[serde(default, alias = "limit", deserialize_with = "lenient_u64")]
    page_size: Option<u64>,
    #[serde(default, alias = "total", deserialize_with = "lenient_u64")]
    total_items: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    total_pages: Option<u64>,
}

/// Counts arrive as numbers or numeric strings depending on the endpoint
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// Splits a list payload into records and page metadata.
/// `Whole` keeps every row (pagination already covers the full list);
/// `window` cuts the requested page out of it.
pub fn parse_page<T: DeserializeOwned>(
    data: Value,
    shape: PageShape,
    requested: PageQuery,
) -> Result<Page<T>, ApiError> {
    let (items, meta) = match shape {
        PageShape::Items => {
            let mut object = into_object(data)?;
            let items = object.remove("items").unwrap_or(Value::Array(Vec::new()));
            let meta = meta_from(Value::Object(object))?;
            (items, meta)
        }
        PageShape::Nested => {
            let mut object = into_object(data)?;
            let items = object.remove("data").unwrap_or(Value::Array(Vec::new()));
            let meta = match object.remove("pagination") {
                Some(pagination) => meta_from(pagination)?,
                None => RawPageMeta::default(),
            };
            (items, meta)
        }
        PageShape::Flat | PageShape::Whole => (data, RawPageMeta::default()),
    };

    let items: Vec<T> = match items {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)
            .map_err(|e| ApiError::InvalidResponse(format!("list items: {}", e)))?,
    };

    let pagination = match shape {
        PageShape::Items | PageShape::Nested => from_meta(&meta, requested, items.len()),
        PageShape::Flat => open_ended(requested, items.len()),
        PageShape::Whole => whole(requested, items.len()),
    };

    Ok(Page { items, pagination })
}

/// Requested page of a full collection. Past the end, the last page is shown.
pub fn window<T>(items: Vec<T>, requested: PageQuery) -> Page<T> {
    let pagination = whole(requested, items.len());
    let size = pagination.page_size as usize;
    let start = (pagination.current_page as usize - 1) * size;
    let items = items.into_iter().skip(start).take(size).collect();
    Page { items, pagination }
}

fn from_meta(meta: &RawPageMeta, requested: PageQuery, received: usize) -> Pagination {
    let page_size = meta
        .page_size
        .map(|s| s as u32)
        .filter(|s| *s > 0)
        .unwrap_or(requested.page_size);
    let total_items = meta.total_items.unwrap_or(received as u64);
    let total_pages = meta
        .total_pages
        .map(|p| p as u32)
        .unwrap_or_else(|| total_items.div_ceil(page_size as u64) as u32);
    let current_page = meta.page.map(|p| p as u32).unwrap_or(requested.page);
    Pagination::new(current_page, page_size, total_items, total_pages)
}

/// Counts for a server page that carries none. Only what was seen so far is
/// known: earlier pages are assumed full.
fn open_ended(requested: PageQuery, received: usize) -> Pagination {
    let PageQuery { page, page_size } = requested;
    let received = received.min(page_size as usize);
    let before = u64::from(page.saturating_sub(1)) * u64::from(page_size);
    let total_pages = if received == 0 && page > 1 {
        // Ran off the end: the previous page is the last one
        page - 1
    } else if received >= page_size as usize {
        page + 1
    } else {
        page
    };
    Pagination::new(page, page_size, before + received as u64, total_pages)
}

fn whole(requested: PageQuery, len: usize) -> Pagination {
    let total_items = len as u64;
    let total_pages = total_items.div_ceil(u64::from(requested.page_size.max(1))) as u32;
    Pagination::new(requested.page, requested.page_size, total_items, total_pages)
}

fn into_object(data: Value) -> Result<serde_json::Map<String, Value>, ApiError> {
    match data {
        Value::Object(object) => Ok(object),
        Value::Null => Ok(serde_json::Map::new()),
        other => Err(ApiError::InvalidResponse(format!(
            "expected a paged object, got {}",
            type_name(&other)
        ))),
    }
}

fn meta_from(value: Value) -> Result<RawPageMeta, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("pagination: {}", e)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
