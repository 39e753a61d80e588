// ============================================================================
// GLOO TRANSPORT - fetch() through gloo-net (browser builds only)
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};

use super::http_client::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder: RequestBuilder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Patch => Request::patch(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| format!("Request build error: {}", e))?,
            None => builder
                .build()
                .map_err(|e| format!("Request build error: {}", e))?,
        };

        let response = prepared
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Error reading response body: {}", e))?;

        Ok(HttpResponse { status, body })
    }
}
