use crate::error::ApiError;
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::models::message::ActionMessage;
use crate::services::api_client::{path_segment, with_query, ApiClient, HttpTransport};

/// Optional narrowing applied by the backend
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AppointmentQuery {
    pub patient_id: Option<String>,
    pub date: Option<String>,
}

impl AppointmentQuery {
    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(patient_id) = self.patient_id.as_deref().filter(|s| !s.is_empty()) {
            params.push(("patient_id".to_string(), patient_id.to_string()));
        }
        if let Some(date) = self.date.as_deref().filter(|s| !s.is_empty()) {
            params.push(("date".to_string(), date.to_string()));
        }
        params
    }
}

pub async fn fetch_appointments<T: HttpTransport>(
    api: &ApiClient<T>,
    query: &AppointmentQuery,
) -> Result<Vec<Appointment>, ApiError> {
    let appointments: Vec<Appointment> = api.get(&with_query("/api/appointments/", &query.params())).await?;
    log::info!("📅 {} appointments loaded", appointments.len());
    Ok(appointments)
}

pub async fn fetch_appointment<T: HttpTransport>(api: &ApiClient<T>, appointment_id: &str) -> Result<Appointment, ApiError> {
    api.get(&format!("/api/appointments/{}", path_segment(appointment_id))).await
}

/// The backend takes the new appointment as query parameters
pub async fn create_appointment<T: HttpTransport>(
    api: &ApiClient<T>,
    appointment: &NewAppointment,
) -> Result<Appointment, ApiError> {
    let missing = appointment.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!("Please fill in: {}", missing.join(", "))));
    }

    let created: Appointment = api
        .post_empty(&with_query("/api/appointments/", &appointment.query()))
        .await?;
    log::info!("✅ Appointment {} booked for {} {}", created.id, appointment.date, appointment.time);
    Ok(created)
}

pub async fn update_appointment_status<T: HttpTransport>(
    api: &ApiClient<T>,
    appointment_id: &str,
    status: &AppointmentStatus,
) -> Result<ActionMessage, ApiError> {
    let path = with_query(
        &format!("/api/appointments/{}", path_segment(appointment_id)),
        &[("status".to_string(), status.as_str().to_string())],
    );
    log::info!("🔄 Appointment {} -> {}", appointment_id, status.as_str());
    api.put_empty(&path).await
}

pub async fn delete_appointment<T: HttpTransport>(api: &ApiClient<T>, appointment_id: &str) -> Result<(), ApiError> {
    log::info!("🗑️ Deleting appointment {}", appointment_id);
    api.delete(&format!("/api/appointments/{}", path_segment(appointment_id))).await
}
