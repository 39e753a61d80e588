
/// Backend base URL
/// Resolved at compile time:
/// - Development: http://localhost:3000 (default)
/// - Production: set API_URL in the environment or in .env (see build.rs)
pub const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

/// localStorage keys for the bearer tokens
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "accessToken";
pub const STORAGE_KEY_REFRESH_TOKEN: &str = "refreshToken";

pub const DEFAULT_PAGE_SIZE: u32 = 10;
