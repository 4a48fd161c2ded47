use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub appointment: bool,
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            appointment: true,
            marketing: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct AppearanceSettings {
    pub theme: Theme,
    #[serde(rename = "compactMode")]
    pub compact_mode: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum DateFormat {
    #[serde(rename = "MM/DD/YYYY")]
    MonthFirst,
    #[default]
    #[serde(rename = "DD/MM/YYYY")]
    DayFirst,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    H12,
    #[default]
    #[serde(rename = "24h")]
    H24,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PreferenceSettings {
    pub language: String,
    #[serde(rename = "timeFormat")]
    pub time_format: TimeFormat,
    #[serde(rename = "dateFormat")]
    pub date_format: DateFormat,
    pub currency: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            time_format: TimeFormat::H24,
            date_format: DateFormat::DayFirst,
            currency: "DZD".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SecuritySettings {
    #[serde(rename = "twoFactorAuth")]
    pub two_factor_auth: bool,
    /// Minutes, kept as a string like the backend does
    #[serde(rename = "sessionTimeout")]
    pub session_timeout: String,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            session_timeout: "30".to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UserSettings {
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub appearance: AppearanceSettings,
    #[serde(default)]
    pub preferences: PreferenceSettings,
    #[serde(default)]
    pub security: SecuritySettings,
}
