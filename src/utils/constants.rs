// localStorage keys
pub const STORAGE_KEY_TOKEN: &str = "token";
pub const STORAGE_KEY_USERNAME: &str = "username";
pub const STORAGE_KEY_MODELS_LOADED: &str = "modelsLoaded";
pub const STORAGE_KEY_MODEL_STATUS: &str = "modelLoadingStatus";
pub const STORAGE_KEY_THEME: &str = "theme";

/// Keys wiped by logout. The theme preference outlives the session.
pub const AUTH_STORAGE_KEYS: [&str; 4] = [
    STORAGE_KEY_TOKEN,
    STORAGE_KEY_USERNAME,
    STORAGE_KEY_MODELS_LOADED,
    STORAGE_KEY_MODEL_STATUS,
];

// Hash routes
pub const LOGIN_ROUTE: &str = "/login";
pub const REPORTS_ROUTE: &str = "#/reports";
pub const HOME_ROUTE: &str = "#/dashboard";

/// Delay before leaving a form after a successful submit
pub const SUCCESS_REDIRECT_DELAY_MS: u32 = 1500;

/// Global injected by the desktop shell with the backend address
pub const DESKTOP_API_URL_GLOBAL: &str = "__DESKTOP_API_URL__";

pub const MB: u64 = 1024 * 1024;
