use chrono::NaiveDate;

use crate::error::ApiError;
use crate::models::message::ActionMessage;
use crate::models::schedule::{AvailableSlots, ScheduleDay};
use crate::services::api_client::{with_query, ApiClient, HttpTransport};

/// Working hours for the whole week; an empty list means nothing saved yet
pub async fn fetch_schedule<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<ScheduleDay>, ApiError> {
    api.get("/api/schedule/").await
}

/// Upsert one weekday. Saving a day off cancels that day's bookings on the
/// backend, so the returned message is worth showing.
pub async fn save_schedule_day<T: HttpTransport>(api: &ApiClient<T>, day: &ScheduleDay) -> Result<ActionMessage, ApiError> {
    if day.day.trim().is_empty() {
        return Err(ApiError::Validation("Day is required".to_string()));
    }
    if day.is_day_off() {
        log::info!("🛌 Marking {} as day off", day.day);
    } else {
        log::info!("🗓️ Saving {} schedule", day.day);
    }
    api.post("/api/schedule/", day).await
}

/// Free and booked slots for a calendar date. The weekday is derived from
/// the date so both always agree.
pub async fn fetch_available_slots<T: HttpTransport>(
    api: &ApiClient<T>,
    date: NaiveDate,
    doctor_id: Option<&str>,
) -> Result<AvailableSlots, ApiError> {
    let mut params = vec![
        ("day".to_string(), date.format("%A").to_string()),
        ("date".to_string(), date.format("%Y-%m-%d").to_string()),
    ];
    if let Some(doctor_id) = doctor_id.filter(|id| !id.is_empty()) {
        params.push(("doctor_id".to_string(), doctor_id.to_string()));
    }
    api.get(&with_query("/api/schedule/available-slots", &params)).await
}
