use crate::error::ApiError;
use crate::models::ecg::EcgAnalysis;
use crate::models::upload::FilePart;
use crate::services::api_client::{ApiClient, HttpTransport};
use crate::services::multipart::MultipartForm;

/// Extensions of a WFDB record
pub const ECG_EXTENSIONS: [&str; 3] = ["dat", "hea", "atr"];

/// A record needs at least its header and signal files
pub fn validate_ecg_files(files: &[FilePart]) -> Result<(), ApiError> {
    if files.is_empty() {
        return Err(ApiError::Validation("Please select the ECG record files".to_string()));
    }

    let extensions: Vec<Option<String>> = files.iter().map(FilePart::extension).collect();
    if let Some(bad) = files
        .iter()
        .zip(&extensions)
        .find(|(_, ext)| !ext.as_deref().is_some_and(|e| ECG_EXTENSIONS.contains(&e)))
        .map(|(file, _)| file)
    {
        return Err(ApiError::Validation(format!(
            "{} is not an ECG record file (.dat, .hea, .atr)",
            bad.file_name
        )));
    }

    let has = |wanted: &str| extensions.iter().any(|ext| ext.as_deref() == Some(wanted));
    if !has("hea") || !has("dat") {
        return Err(ApiError::Validation(
            "Both the .hea header and the .dat signal file are required".to_string(),
        ));
    }
    Ok(())
}

/// Uploads the record and waits for the classification
pub async fn analyze_ecg<T: HttpTransport>(api: &ApiClient<T>, files: Vec<FilePart>) -> Result<EcgAnalysis, ApiError> {
    validate_ecg_files(&files)?;

    let form = files
        .into_iter()
        .fold(MultipartForm::new(), |form, part| form.file("file", part));
    let analysis: EcgAnalysis = api.upload("/api/files/upload/ecg", form).await?;
    log::info!(
        "🫀 ECG classified as {} ({:.1}%) over {} segments",
        analysis.final_prediction.class_name,
        analysis.final_prediction.confidence,
        analysis.predictions.len()
    );
    Ok(analysis)
}
