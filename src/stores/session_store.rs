// ============================================================================
// SESSION STORE - Token lifecycle, current profile, login/logout
// ============================================================================
// The only writer of the TokenVault. `is_authenticated()` turns true only
// after the server accepted the token (login + profile, or a profile check at startup)
// and drops back to false on any failure, network errors included.
// ============================================================================

use std::rc::Rc;

use crate::error::{ApiError, ApiResult};
use crate::models::Profile;
use crate::services::AuthApi;
use crate::state::{StoreCell, SubscriptionId, TokenSource, TokenVault};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    AuthFailed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub status: AuthStatus,
    pub profile: Option<Profile>,
    pub error: Option<String>,
    pub loading: bool,
}

impl SessionSnapshot {
    fn failed(message: String) -> Self {
        Self {
            status: AuthStatus::AuthFailed,
            profile: None,
            error: Some(message),
            loading: false,
        }
    }
}

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const MISSING_TOKENS: &str = "Missing tokens in response";
const LOGIN_FAILED: &str = "Login failed";

#[derive(Clone)]
pub struct SessionStore {
    vault: Rc<TokenVault>,
    auth: AuthApi,
    state: StoreCell<SessionSnapshot>,
}

impl SessionStore {
    /// `auth` must read its bearer token from `vault`
    pub fn new(vault: Rc<TokenVault>, auth: AuthApi) -> Self {
        // A stored token is under review until `fetch_profile` settles it
        let initial = if vault.access_token().is_some() {
            SessionSnapshot {
                status: AuthStatus::Authenticating,
                loading: true,
                ..SessionSnapshot::default()
            }
        } else {
            SessionSnapshot::default()
        };
        Self {
            vault,
            auth,
            state: StoreCell::new(initial),
        }
    }

    /// ANONYMOUS/AUTH_FAILED -> AUTHENTICATING -> AUTHENTICATED | AUTH_FAILED
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        self.state.set(SessionSnapshot {
            status: AuthStatus::Authenticating,
            profile: None,
            error: None,
            loading: true,
        });

        let data = match self.auth.login(email, password).await {
            Ok(data) => data,
            Err(e) => {
                let message = match &e {
                    ApiError::Http { .. } => e.display_message(INVALID_CREDENTIALS),
                    _ => LOGIN_FAILED.to_string(),
                };
                log::error!("❌ Login rejected: {}", e);
                self.state.set(SessionSnapshot::failed(message));
                return Err(e);
            }
        };

        let Some(access_token) = data.access_token() else {
            log::error!("❌ Login response carried no access token");
            self.vault.clear_all();
            self.state.set(SessionSnapshot::failed(MISSING_TOKENS.to_string()));
            return Err(ApiError::InvalidResponse(MISSING_TOKENS.to_string()));
        };

        self.vault
            .store(access_token, data.refresh_token.as_deref());
        log::info!("🔑 Token stored, confirming profile");

        // The embedded user is provisional until /me confirms it
        if let Some(user) = data.user.clone() {
            self.state.update(|s| s.profile = Some(user));
        }

        match self.auth.fetch_profile().await {
            Ok(profile) => {
                log::info!("✅ Logged in as {}", profile.display_name());
                self.state.set(SessionSnapshot {
                    status: AuthStatus::Authenticated,
                    profile: Some(profile),
                    error: None,
                    loading: false,
                });
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Profile check after login failed: {}", e);
                self.vault.clear_all();
                self.state
                    .set(SessionSnapshot::failed(e.display_message(LOGIN_FAILED)));
                Err(e)
            }
        }
    }

    /// Startup check of a stored token and post-login confirmation. Without a stored token
    /// nothing is sent. Any failure clears the token (fail-closed).
    pub async fn fetch_profile(&self) -> ApiResult<Profile> {
        if self.vault.access_token().is_none() {
            log::info!("🔓 No stored token, staying anonymous");
            self.state.set(SessionSnapshot::default());
            return Err(ApiError::MissingCredentials);
        }

        self.state.update(|s| {
            s.status = AuthStatus::Authenticating;
            s.loading = true;
            s.error = None;
        });

        match self.auth.fetch_profile().await {
            Ok(profile) => {
                log::info!("✅ Session restored for {}", profile.display_name());
                self.state.set(SessionSnapshot {
                    status: AuthStatus::Authenticated,
                    profile: Some(profile.clone()),
                    error: None,
                    loading: false,
                });
                Ok(profile)
            }
            Err(e) => {
                log::warn!("⚠️ Stored token not accepted ({}), signing out", e);
                self.vault.clear_access();
                self.state.set(SessionSnapshot::default());
                Err(e)
            }
        }
    }

    /// Local only: tokens and profile are gone when this returns
    pub fn logout(&self) {
        self.vault.clear_all();
        self.state.set(SessionSnapshot::default());
        log::info!("👋 Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.status == AuthStatus::Authenticated)
            && self.vault.access_token().is_some()
    }

    pub fn status(&self) -> AuthStatus {
        self.state.with(|s| s.status)
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.with(|s| s.profile.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn access_token(&self) -> Option<String> {
        self.vault.access_token()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::services::{ApiClient, HttpMethod};
    use crate::testing::{block_on, FakeBackend};
    use crate::utils::{KeyValueStorage, MemoryStorage, STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_REFRESH_TOKEN};

    struct Harness {
        backend: Rc<FakeBackend>,
        storage: Rc<MemoryStorage>,
        session: SessionStore,
    }

    fn harness(storage: MemoryStorage) -> Harness {
        let backend = FakeBackend::new();
        let storage = Rc::new(storage);
        let vault = Rc::new(TokenVault::load(storage.clone()));
        let client = ApiClient::new("http://api.test", backend.clone(), vault.clone());
        Harness {
            backend,
            storage,
            session: SessionStore::new(vault, AuthApi::new(client)),
        }
    }

    fn user() -> serde_json::Value {
        json!({"_id": "u1", "email": "a@b.com", "firstName": "Ada", "lastName": "Lovelace"})
    }

    #[test]
    fn login_with_legacy_token_authenticates() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": true, "data": {"token": "T", "user": user()}}),
        );
        h.backend
            .respond(HttpMethod::Get, "/v1/auth/me", 200, json!({"success": true, "data": user()}));

        block_on(h.session.login("a@b.com", "x")).unwrap();

        assert!(h.session.is_authenticated());
        assert_eq!(h.session.access_token().as_deref(), Some("T"));
        assert_eq!(h.storage.get(STORAGE_KEY_ACCESS_TOKEN).as_deref(), Some("T"));
        let expected: Profile = serde_json::from_value(user()).unwrap();
        assert_eq!(h.session.profile(), Some(expected));
        assert_eq!(
            h.backend.last_request().unwrap().header("authorization"),
            Some("Bearer T")
        );
    }

    #[test]
    fn login_with_token_pair_persists_both() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            201,
            json!({"success": true, "data": {"accessToken": "A", "refreshToken": "R"}}),
        );
        h.backend
            .respond(HttpMethod::Get, "/v1/auth/me", 200, json!({"success": true, "data": user()}));

        block_on(h.session.login("a@b.com", "x")).unwrap();

        assert_eq!(h.session.status(), AuthStatus::Authenticated);
        assert_eq!(h.storage.get(STORAGE_KEY_REFRESH_TOKEN).as_deref(), Some("R"));
    }

    #[test]
    fn rejected_login_shows_server_message() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": false, "message": "Invalid credentials"}),
        );

        let err = block_on(h.session.login("a@b.com", "wrong")).unwrap_err();

        assert!(matches!(err, ApiError::Http { .. }));
        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.status(), AuthStatus::AuthFailed);
        assert_eq!(h.session.error().as_deref(), Some("Invalid credentials"));
        assert_eq!(h.backend.count(HttpMethod::Get, "/v1/auth/me"), 0);
    }

    #[test]
    fn rejection_without_message_uses_generic_text() {
        let h = harness(MemoryStorage::new());
        h.backend.respond_raw(HttpMethod::Post, "/v1/auth/login", 401, "");

        block_on(h.session.login("a@b.com", "wrong")).unwrap_err();
        assert_eq!(h.session.error().as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn network_error_on_login() {
        let h = harness(MemoryStorage::new());
        h.backend.fail_network(HttpMethod::Post, "/v1/auth/login");

        block_on(h.session.login("a@b.com", "x")).unwrap_err();
        assert_eq!(h.session.error().as_deref(), Some("Login failed"));
        assert!(!h.session.is_loading());
    }

    #[test]
    fn success_without_token_fails() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": true, "data": {"user": user()}}),
        );

        block_on(h.session.login("a@b.com", "x")).unwrap_err();

        assert_eq!(h.session.status(), AuthStatus::AuthFailed);
        assert_eq!(h.session.error().as_deref(), Some("Missing tokens in response"));
        assert_eq!(h.session.access_token(), None);
    }

    #[test]
    fn profile_failure_after_login_clears_credentials() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": true, "data": {"token": "T"}}),
        );
        h.backend.fail_network(HttpMethod::Get, "/v1/auth/me");

        block_on(h.session.login("a@b.com", "x")).unwrap_err();

        assert_eq!(h.session.status(), AuthStatus::AuthFailed);
        assert_eq!(h.session.access_token(), None);
        assert_eq!(h.storage.get(STORAGE_KEY_ACCESS_TOKEN), None);
        assert_eq!(h.session.profile(), None);
    }

    #[test]
    fn starts_anonymous_without_stored_token() {
        let h = harness(MemoryStorage::new());
        assert_eq!(h.session.status(), AuthStatus::Anonymous);
        assert!(!h.session.is_loading());
    }

    #[test]
    fn fetch_profile_without_token_sends_nothing() {
        let h = harness(MemoryStorage::new());

        let err = block_on(h.session.fetch_profile()).unwrap_err();

        assert_eq!(err, ApiError::MissingCredentials);
        assert_eq!(h.session.status(), AuthStatus::Anonymous);
        assert_eq!(h.backend.request_count(), 0);
    }

    #[test]
    fn fetch_profile_restores_stored_session() {
        let h = harness(MemoryStorage::with_entry(STORAGE_KEY_ACCESS_TOKEN, "T"));
        h.backend
            .respond(HttpMethod::Get, "/v1/auth/me", 200, json!({"success": true, "data": user()}));

        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.status(), AuthStatus::Authenticating);
        assert!(h.session.is_loading());
        let profile = block_on(h.session.fetch_profile()).unwrap();

        assert_eq!(profile.email.as_deref(), Some("a@b.com"));
        assert!(h.session.is_authenticated());
    }

    #[test]
    fn fetch_profile_is_fail_closed() {
        let h = harness(MemoryStorage::with_entry(STORAGE_KEY_ACCESS_TOKEN, "T"));
        h.backend.fail_network(HttpMethod::Get, "/v1/auth/me");

        block_on(h.session.fetch_profile()).unwrap_err();

        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.status(), AuthStatus::Anonymous);
        assert_eq!(h.storage.get(STORAGE_KEY_ACCESS_TOKEN), None);
    }

    #[test]
    fn rejected_token_is_dropped() {
        let h = harness(MemoryStorage::with_entry(STORAGE_KEY_ACCESS_TOKEN, "expired"));
        h.backend
            .respond(HttpMethod::Get, "/v1/auth/me", 401, json!({"message": "jwt expired"}));

        let err = block_on(h.session.fetch_profile()).unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(h.session.access_token(), None);
    }

    #[test]
    fn logout_clears_everything() {
        let h = harness(MemoryStorage::new());
        h.backend.respond(
            HttpMethod::Post,
            "/v1/auth/login",
            200,
            json!({"success": true, "data": {"accessToken": "A", "refreshToken": "R"}}),
        );
        h.backend
            .respond(HttpMethod::Get, "/v1/auth/me", 200, json!({"success": true, "data": user()}));
        block_on(h.session.login("a@b.com", "x")).unwrap();

        h.session.logout();

        assert!(!h.session.is_authenticated());
        assert_eq!(h.session.profile(), None);
        assert_eq!(h.storage.get(STORAGE_KEY_ACCESS_TOKEN), None);
        assert_eq!(h.storage.get(STORAGE_KEY_REFRESH_TOKEN), None);
    }
}
