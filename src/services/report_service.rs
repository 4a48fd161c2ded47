use crate::error::ApiError;
use crate::models::report::{MedicalReport, TextReportCreate, UploadReportResponse};
use crate::services::api_client::{path_segment, ApiClient, HttpTransport};
use crate::services::multipart::MultipartForm;

/// Reports written by the logged-in doctor, every patient
pub async fn fetch_reports<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<MedicalReport>, ApiError> {
    let reports: Vec<MedicalReport> = api.get("/api/medical-reports").await?;
    log::info!("📄 {} reports loaded", reports.len());
    Ok(reports)
}

pub async fn fetch_patient_reports<T: HttpTransport>(
    api: &ApiClient<T>,
    patient_id: &str,
) -> Result<Vec<MedicalReport>, ApiError> {
    api.get(&format!("/api/medical-reports/patient/{}", path_segment(patient_id))).await
}

pub async fn fetch_report<T: HttpTransport>(api: &ApiClient<T>, report_id: &str) -> Result<MedicalReport, ApiError> {
    api.get(&format!("/api/medical-reports/{}", path_segment(report_id))).await
}

/// File report upload; the form is assembled by the report form view model
pub async fn upload_report<T: HttpTransport>(api: &ApiClient<T>, form: MultipartForm) -> Result<UploadReportResponse, ApiError> {
    let response: UploadReportResponse = api.upload("/api/medical-reports/upload", form).await?;
    log::info!("✅ Report stored as {}", response.id);
    Ok(response)
}

pub async fn create_text_report<T: HttpTransport>(
    api: &ApiClient<T>,
    report: &TextReportCreate,
) -> Result<MedicalReport, ApiError> {
    let created: MedicalReport = api.post("/api/medical-reports/text", report).await?;
    log::info!("✅ Text report stored as {}", created.id);
    Ok(created)
}

pub async fn delete_report<T: HttpTransport>(api: &ApiClient<T>, report_id: &str) -> Result<(), ApiError> {
    log::info!("🗑️ Deleting report {}", report_id);
    api.delete(&format!("/api/medical-reports/{}", path_segment(report_id))).await
}

/// Absolute address of the stored file, for links and previews
pub fn report_download_url<T: HttpTransport>(api: &ApiClient<T>, report_id: &str) -> String {
    api.url(&format!("/api/medical-reports/download/{}", path_segment(report_id)))
}
