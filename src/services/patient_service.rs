use crate::error::ApiError;
use crate::models::patient::{Patient, PatientInput};
use crate::services::api_client::{path_segment, ApiClient, HttpTransport};

/// Fetch every patient of the logged-in doctor
pub async fn fetch_patients<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<Patient>, ApiError> {
    let patients: Vec<Patient> = api.get("/api/patients/").await?;
    log::info!("👥 {} patients loaded", patients.len());
    Ok(patients)
}

pub async fn fetch_patient<T: HttpTransport>(api: &ApiClient<T>, patient_id: &str) -> Result<Patient, ApiError> {
    api.get(&format!("/api/patients/{}", path_segment(patient_id))).await
}

/// Create a patient; identity and contact fields are checked locally first
pub async fn create_patient<T: HttpTransport>(api: &ApiClient<T>, input: &PatientInput) -> Result<Patient, ApiError> {
    let missing = input.missing_for_create();
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!("Please fill in: {}", missing.join(", "))));
    }

    let patient: Patient = api.post("/api/patients/", input).await?;
    log::info!("✅ Patient created: {}", patient.id);
    Ok(patient)
}

pub async fn update_patient<T: HttpTransport>(
    api: &ApiClient<T>,
    patient_id: &str,
    input: &PatientInput,
) -> Result<Patient, ApiError> {
    api.put(&format!("/api/patients/{}", path_segment(patient_id)), input).await
}

pub async fn delete_patient<T: HttpTransport>(api: &ApiClient<T>, patient_id: &str) -> Result<(), ApiError> {
    log::info!("🗑️ Deleting patient {}", patient_id);
    api.delete(&format!("/api/patients/{}", path_segment(patient_id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api_client::{Method, RequestBody};
    use crate::test_support::{block_on, logged_in_client};

    #[test]
    fn list_accepts_mongo_ids() {
        let (client, _, _) = logged_in_client();
        client.transport().respond(
            200,
            r#"[{"_id":"p1","firstName":"Amina","lastName":"Benali"},{"id":"p2","firstName":"Karim","lastName":"Saadi"}]"#,
        );

        let patients = block_on(fetch_patients(&client)).unwrap();

        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id, "p1");
        assert_eq!(patients[1].full_name(), "Karim Saadi");
    }

    #[test]
    fn incomplete_patient_is_rejected_locally() {
        let (client, _, _) = logged_in_client();
        let input = PatientInput { first_name: Some("Amina".into()), ..Default::default() };

        let error = block_on(create_patient(&client, &input)).unwrap_err();

        assert_eq!(error, ApiError::Validation("Please fill in: last name, phone, gender".into()));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let (client, _, _) = logged_in_client();
        client
            .transport()
            .respond(200, r#"{"_id":"p1","firstName":"Amina","lastName":"Benali","phone":"0661"}"#);
        let input = PatientInput { phone: Some("0661".into()), ..Default::default() };

        let patient = block_on(update_patient(&client, "p1", &input)).unwrap();

        assert_eq!(patient.phone.as_deref(), Some("0661"));
        let sent = &client.transport().requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "http://clinic.test/api/patients/p1");
        assert_eq!(sent.body, RequestBody::Json(r#"{"phone":"0661"}"#.into()));
    }

    #[test]
    fn delete_accepts_no_content() {
        let (client, _, _) = logged_in_client();
        client.transport().respond(204, "");

        assert_eq!(block_on(delete_patient(&client, "p1")), Ok(()));
        assert_eq!(client.transport().requests()[0].method, Method::Delete);
    }

    #[test]
    fn id_stays_inside_its_path_segment() {
        let (client, _, _) = logged_in_client();
        client.transport().respond(204, "");

        block_on(delete_patient(&client, "../reports?all=1")).unwrap();

        assert_eq!(
            client.transport().requests()[0].url,
            "http://clinic.test/api/patients/..%2Freports%3Fall%3D1"
        );
    }
}
