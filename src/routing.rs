// ============================================================================
// ROUTING - Dashboard screens and the authentication guard
// ============================================================================

use crate::stores::{AuthStatus, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Users,
    Categories,
    Articles,
    Tags,
    Packages,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Login,
        Route::Dashboard,
        Route::Users,
        Route::Categories,
        Route::Articles,
        Route::Tags,
        Route::Packages,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Users => "/users",
            Route::Categories => "/categories",
            Route::Articles => "/articles",
            Route::Tags => "/tags",
            Route::Packages => "/packages",
        }
    }

    /// Ignores query string, fragment and trailing slashes.
    /// Nested paths resolve to their section (`/packages/p1/keys` -> Packages).
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let first = path.trim_matches('/').split('/').next().unwrap_or_default();
        match first {
            "" | "dashboard" => Some(Route::Dashboard),
            "login" => Some(Route::Login),
            "users" => Some(Route::Users),
            "categories" => Some(Route::Categories),
            "articles" => Some(Route::Articles),
            "tags" => Some(Route::Tags),
            "packages" => Some(Route::Packages),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Route),
    /// Stored token still being checked, render nothing yet
    Pending,
}

/// Decides every navigation from the session's authenticated flag
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn resolve(&self, route: Route) -> Navigation {
        if self.session.status() == AuthStatus::Authenticating {
            return Navigation::Pending;
        }

        let authenticated = self.session.is_authenticated();
        let decision = match (route.requires_auth(), authenticated) {
            (true, false) => Navigation::Redirect(Route::Login),
            (false, true) => Navigation::Redirect(Route::Dashboard),
            _ => Navigation::Allow,
        };

        if let Navigation::Redirect(target) = decision {
            log::debug!("🧭 {} -> {}", route.path(), target.path());
        }
        decision
    }

    /// Same as `resolve`; unknown paths are sent to the dashboard
    pub fn resolve_path(&self, path: &str) -> Navigation {
        match Route::from_path(path) {
            Some(route) => self.resolve(route),
            None => {
                log::warn!("⚠️ Unknown route {}", path);
                match self.resolve(Route::Dashboard) {
                    Navigation::Allow => Navigation::Redirect(Route::Dashboard),
                    other => other,
                }
            }
        }
    }
}
