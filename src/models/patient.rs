use serde::{Deserialize, Serialize};

use crate::utils::format::full_name;

/// Read-only projection of a patient record
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Patient {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Body for create and update calls; `None` fields are left untouched
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct PatientInput {
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl PatientInput {
    /// Local required-field check for the create form
    pub fn missing_for_create(&self) -> Vec<&'static str> {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).is_some_and(|s| !s.is_empty());
        let mut missing = Vec::new();
        if !present(&self.first_name) {
            missing.push("first name");
        }
        if !present(&self.last_name) {
            missing.push("last name");
        }
        if !present(&self.phone) {
            missing.push("phone");
        }
        if !present(&self.gender) {
            missing.push("gender");
        }
        missing
    }
}
