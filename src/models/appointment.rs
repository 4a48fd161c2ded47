use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Other(s) => s,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => AppointmentStatus::Pending,
            "confirmed" => AppointmentStatus::Confirmed,
            "completed" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(raw.to_string()),
        }
    }

    /// CSS badge modifier used by the tables
    pub fn badge_class(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "badge-warning",
            AppointmentStatus::Confirmed => "badge-info",
            AppointmentStatus::Completed => "badge-success",
            AppointmentStatus::Cancelled => "badge-danger",
            AppointmentStatus::Other(_) => "badge-secondary",
        }
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Legacy documents carry `"status": null`
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(AppointmentStatus::parse).unwrap_or_default())
    }
}

/// Reads `null` as the type's default, like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Appointment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Creation parameters, sent as a query string
#[derive(Clone, PartialEq, Debug)]
pub struct NewAppointment {
    pub patient_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub cost: Option<f64>,
}

impl NewAppointment {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("patient", &self.patient_id),
            ("date", &self.date),
            ("time", &self.time),
            ("reason", &self.reason),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    pub fn query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("patient_id".to_string(), self.patient_id.clone()),
            ("date".to_string(), self.date.clone()),
            ("time".to_string(), self.time.clone()),
            ("reason".to_string(), self.reason.clone()),
            ("status".to_string(), self.status.as_str().to_string()),
        ];
        if let Some(cost) = self.cost {
            params.push(("cost".to_string(), cost.to_string()));
        }
        params
    }
}
