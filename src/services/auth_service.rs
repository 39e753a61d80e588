use super::api_client::{decode, ApiClient};
use super::http_client::HttpMethod;
use crate::error::{ApiError, ApiResult};
use crate::models::{LoginData, LoginRequest, Profile};

const LOGIN_PATH: &str = "/v1/auth/login";
const PROFILE_PATH: &str = "/v1/auth/me";

/// Auth endpoints; state lives in SessionStore
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST credentials; a rejected login comes back as `ApiError::Http`
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginData> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 Logging in as {}", email);

        let data = self
            .client
            .send_json(HttpMethod::Post, LOGIN_PATH, &request)
            .await?;
        if data.is_null() {
            return Ok(LoginData::default());
        }
        decode(data)
    }

    /// Current admin profile. An empty payload counts as a rejection.
    pub async fn fetch_profile(&self) -> ApiResult<Profile> {
        let data = self.client.get(PROFILE_PATH, &[]).await?;
        if data.is_null() {
            return Err(ApiError::InvalidResponse("profile missing from response".to_string()));
        }
        decode(data)
    }
}
