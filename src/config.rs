use serde::{Deserialize, Serialize};

use crate::utils::{API_URL, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub default_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            log_level: "info".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Resolved once at startup from the compile-time environment
    pub fn resolve() -> Self {
        let mut config = Self {
            environment: option_env!("APP_ENV").unwrap_or("development").to_string(),
            ..Self::default()
        }
        .with_base_url(API_URL);
        config.log_level = option_env!("LOG_LEVEL")
            .unwrap_or(config.default_log_level())
            .to_string();
        config
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Quieter in production unless LOG_LEVEL says otherwise
    fn default_log_level(&self) -> &'static str {
        if self.is_production() {
            "warn"
        } else {
            "info"
        }
    }

    /// Level handed to the logger; `Off` when logging is disabled
    pub fn log_level_filter(&self) -> log::LevelFilter {
        if !self.enable_logging {
            return log::LevelFilter::Off;
        }
        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        }
    }
}
