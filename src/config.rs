use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: DEFAULT_BACKEND_URL.to_string(),
            backend_url_production: DEFAULT_BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        Self {
            backend_url_development: option_env!("API_BASE_URL_DEVELOPMENT")
                .unwrap_or(DEFAULT_BACKEND_URL).to_string(),
            backend_url_production: option_env!("API_BASE_URL_PRODUCTION")
                .unwrap_or(DEFAULT_BACKEND_URL).to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            network_timeout_seconds: option_env!("NETWORK_TIMEOUT_SECONDS")
                .unwrap_or("30").parse().unwrap_or(30),
        }
    }

    /// Backend URL for the current environment
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Base address used by the API client. An address handed over by the
    /// desktop shell takes precedence over the build-time one.
    pub fn resolve_base_url(&self, shell_override: Option<&str>) -> String {
        let url = match shell_override.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => self.backend_url(),
        };
        url.trim_end_matches('/').to_string()
    }

    pub fn timeout_ms(&self) -> u32 {
        self.network_timeout_seconds.saturating_mul(1000)
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Global configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

/// Backend address injected by the desktop shell as a window global
#[cfg(target_arch = "wasm32")]
pub fn desktop_shell_url() -> Option<String> {
    use crate::utils::constants::DESKTOP_API_URL_GLOBAL;

    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(DESKTOP_API_URL_GLOBAL))
        .ok()?
        .as_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_environment_selects_production_url() {
        let config = AppConfig {
            backend_url_production: "https://api.clinic.example".to_string(),
            environment: "production".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.backend_url(), "https://api.clinic.example");
        assert_eq!(config.resolve_base_url(None), "https://api.clinic.example");
    }

    #[test]
    fn shell_override_wins_and_is_trimmed() {
        let config = AppConfig::default();
        assert_eq!(
            config.resolve_base_url(Some("http://127.0.0.1:9000/")),
            "http://127.0.0.1:9000"
        );
        assert_eq!(config.resolve_base_url(Some("  ")), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn timeout_is_expressed_in_milliseconds() {
        let config = AppConfig { network_timeout_seconds: 12, ..AppConfig::default() };
        assert_eq!(config.timeout_ms(), 12_000);
    }
}
