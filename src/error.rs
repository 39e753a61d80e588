// ============================================================================
// ERRORS - Normalized API error taxonomy
// ============================================================================
// Every store talks to the backend through ApiClient and only ever sees
// ApiError. Form validation never reaches this layer.
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response from the server (connection refused, timeout, CORS...)
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status or a failure envelope
    #[error("HTTP {status}: {}", server_message.as_deref().unwrap_or("request failed"))]
    Http {
        status: u16,
        server_message: Option<String>,
    },

    /// Local precondition: no access token, nothing was sent
    #[error("Access token is missing. Please log in again.")]
    MissingCredentials,

    /// 2xx response whose body could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn http(status: u16, server_message: Option<String>) -> Self {
        Self::Http {
            status,
            server_message: server_message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Message provided by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http {
                server_message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Display string for the UI: server message first, then the caller's
    /// per-operation fallback. Missing credentials keep their own wording.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::MissingCredentials => self.to_string(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
