//! Runtime configuration.
//!
//! Built once at startup and handed to handlers through `web::Data`; nothing
//! else reads the environment.

use std::time::Duration;

use crate::models::Theme;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "Fellowship Attendance";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Cookie signing keys shorter than this are replaced by a random key.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the attendance API, without a trailing slash.
    pub api_url: String,
    /// Theme for browsers that have not picked one.
    pub theme: Theme,
    pub bind_addr: String,
    pub app_name: String,
    pub api_timeout: Duration,
    pub session_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme: Theme::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            session_key: None,
        }
    }
}

impl AppConfig {
    /// Read from the process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Invalid values fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let api_url = get("API_URL")
            .or_else(|| get("NEXT_PUBLIC_API_URL"))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let theme = match get("DEFAULT_THEME") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("DEFAULT_THEME: {e}, using {}", defaults.theme);
                defaults.theme
            }),
            None => defaults.theme,
        };

        let api_timeout = match get("API_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "API_TIMEOUT_SECS '{raw}' is not a positive integer, using {DEFAULT_API_TIMEOUT_SECS}"
                    );
                    defaults.api_timeout
                }
            },
            None => defaults.api_timeout,
        };

        Self {
            api_url,
            theme,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            api_timeout,
            session_key: get("SESSION_KEY"),
        }
    }
}
