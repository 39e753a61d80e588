// ============================================================================
// API CLIENT - HTTP only (stateless apart from the injected token source)
// ============================================================================
// Resolves paths against the base URL, attaches the bearer token when one
// exists and turns every failure into an ApiError. No business logic.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::http_client::{HttpMethod, HttpRequest, HttpTransport};
use crate::error::{ApiError, ApiResult};
use crate::models::{extract_message, Envelope};
use crate::state::TokenSource;

/// Decoded 2xx response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    tokens: Rc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenSource>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when a bearer token would be attached to the next request
    pub fn has_credentials(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// One round trip. 2xx bodies are decoded as JSON (empty body = null);
    /// anything else is an error carrying the server's message when present.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
    ) -> ApiResult<ApiResponse> {
        let mut headers = Vec::new();
        if let Some(token) = self.tokens.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url: self.url(path),
            query: query.to_vec(),
            headers,
            body,
        };

        log::debug!("➡️ {} {}", method, request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ {} {} failed: {}", method, path, e);
            ApiError::Network(e)
        })?;

        let parsed = if response.body.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str::<Value>(&response.body)
        };

        if !response.ok() {
            let server_message = parsed.ok().as_ref().and_then(extract_message);
            log::warn!(
                "⚠️ {} {} -> HTTP {} ({})",
                method,
                path,
                response.status,
                server_message.as_deref().unwrap_or("no message")
            );
            return Err(ApiError::http(response.status, server_message));
        }

        let body = parsed.map_err(|e| ApiError::InvalidResponse(format!("Parse error: {}", e)))?;
        Ok(ApiResponse {
            status: response.status,
            body,
        })
    }

    /// `request` plus envelope normalization; returns the envelope's `data`
    pub async fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(String, String)],
    ) -> ApiResult<Value> {
        let response = self.request(method, path, body, query).await?;
        Envelope::from_value(response.body).into_data(response.status)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        self.call(HttpMethod::Get, path, None, query).await
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        let body = encode(body)?;
        self.call(method, path, Some(body), &[]).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.call(HttpMethod::Delete, path, None, &[]).await
    }
}

pub fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidResponse(format!("Serialization error: {}", e)))
}

pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(format!("Parse error: {}", e)))
}
