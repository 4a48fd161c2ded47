use crate::error::ApiError;
use crate::models::settings::{Theme, UserSettings};
use crate::services::api_client::{ApiClient, HttpTransport};
use crate::utils::constants::STORAGE_KEY_THEME;
use crate::utils::storage::KeyValueStore;

/// Backend answers defaults when nothing was saved yet
pub async fn fetch_settings<T: HttpTransport>(api: &ApiClient<T>) -> Result<UserSettings, ApiError> {
    let settings: UserSettings = api.get("/api/settings/").await?;
    remember_theme(api.session().store(), settings.appearance.theme);
    Ok(settings)
}

pub async fn update_settings<T: HttpTransport>(api: &ApiClient<T>, settings: &UserSettings) -> Result<UserSettings, ApiError> {
    log::info!("⚙️ Saving settings");
    let saved: UserSettings = api.put("/api/settings/", settings).await?;
    remember_theme(api.session().store(), saved.appearance.theme);
    Ok(saved)
}

pub async fn reset_settings<T: HttpTransport>(api: &ApiClient<T>) -> Result<UserSettings, ApiError> {
    log::info!("⚙️ Resetting settings to defaults");
    let defaults: UserSettings = api.post_empty("/api/settings/reset").await?;
    remember_theme(api.session().store(), defaults.appearance.theme);
    Ok(defaults)
}

/// Theme applied before the settings page has loaded. Outlives logout.
pub fn stored_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(STORAGE_KEY_THEME).as_deref() {
        Some("dark") => Theme::Dark,
        Some("system") => Theme::System,
        _ => Theme::Light,
    }
}

fn remember_theme(store: &dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set(STORAGE_KEY_THEME, theme.as_str()) {
        log::warn!("⚠️ Could not persist theme: {}", e);
    }
}
