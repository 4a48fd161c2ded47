use serde::{Deserialize, Serialize};

/// Acknowledgement returned by update, save and delete endpoints
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ActionMessage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionMessage {
    pub fn text_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}
