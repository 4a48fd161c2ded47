// ============================================================================
// REPORT FORM VIEWMODEL - One form for every report type
// ============================================================================
// Each report type is a row of REPORT_FORMS: which fields are required,
// which files are accepted, how the description is composed and where the
// payload goes. The form logic below is shared by all of them.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ApiError;
use crate::models::report::{ReportDraft, ReportType, TextReportCreate};
use crate::services::api_client::{ApiClient, HttpTransport};
use crate::services::multipart::MultipartForm;
use crate::services::report_service::{create_text_report, upload_report};
use crate::utils::constants::{MB, REPORTS_ROUTE, SUCCESS_REDIRECT_DELAY_MS};
use crate::utils::format::{format_file_size, join_non_empty, parse_date};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DraftField {
    Patient,
    Title,
    Description,
    ScanType,
    BodyPart,
    TestName,
    Medication,
    Dosage,
    Findings,
    Recommendations,
    File,
    Date,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Patient => "patient",
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::ScanType => "scan type",
            DraftField::BodyPart => "body part",
            DraftField::TestName => "test name",
            DraftField::Medication => "medication",
            DraftField::Dosage => "dosage",
            DraftField::Findings => "findings",
            DraftField::Recommendations => "recommendations",
            DraftField::File => "file",
            DraftField::Date => "date",
        }
    }

    pub fn is_filled(&self, draft: &ReportDraft) -> bool {
        let text = |value: &str| !value.trim().is_empty();
        match self {
            DraftField::Patient => draft.patient_id.as_deref().is_some_and(text),
            DraftField::Title => text(&draft.title),
            DraftField::Description => text(&draft.description),
            DraftField::ScanType => text(&draft.scan_type),
            DraftField::BodyPart => text(&draft.body_part),
            DraftField::TestName => text(&draft.test_name),
            DraftField::Medication => text(&draft.medication),
            DraftField::Dosage => text(&draft.dosage),
            DraftField::Findings => text(&draft.findings),
            DraftField::Recommendations => text(&draft.recommendations),
            DraftField::File => draft.file.is_some(),
            DraftField::Date => draft.date.is_some(),
        }
    }

    /// Whether the field is typed into a text input
    pub fn is_text(&self) -> bool {
        !matches!(self, DraftField::Patient | DraftField::File | DraftField::Date)
    }

    pub fn value<'a>(&self, draft: &'a ReportDraft) -> &'a str {
        match self {
            DraftField::Patient => draft.patient_id.as_deref().unwrap_or_default(),
            DraftField::Title => &draft.title,
            DraftField::Description => &draft.description,
            DraftField::ScanType => &draft.scan_type,
            DraftField::BodyPart => &draft.body_part,
            DraftField::TestName => &draft.test_name,
            DraftField::Medication => &draft.medication,
            DraftField::Dosage => &draft.dosage,
            DraftField::Findings => &draft.findings,
            DraftField::Recommendations => &draft.recommendations,
            DraftField::File | DraftField::Date => "",
        }
    }

    /// Writes raw input into the draft. Dates are `YYYY-MM-DD` as produced
    /// by a date input; anything else clears the date.
    pub fn write(&self, draft: &mut ReportDraft, value: String) {
        match self {
            DraftField::Patient => draft.patient_id = Some(value).filter(|v| !v.trim().is_empty()),
            DraftField::Title => draft.title = value,
            DraftField::Description => draft.description = value,
            DraftField::ScanType => draft.scan_type = value,
            DraftField::BodyPart => draft.body_part = value,
            DraftField::TestName => draft.test_name = value,
            DraftField::Medication => draft.medication = value,
            DraftField::Dosage => draft.dosage = value,
            DraftField::Findings => draft.findings = value,
            DraftField::Recommendations => draft.recommendations = value,
            DraftField::Date => draft.date = parse_date(&value),
            DraftField::File => {}
        }
    }
}

/// How the description sent to the backend is built from the draft
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DescriptionRule {
    /// `{title}: {description}`
    Titled,
    /// `{scan_type} - {body_part}: {description}`
    ScanSummary,
    /// `Lab Test: {test_name}. {description}`
    LabTest,
    /// `Prescription: {medication} {dosage}. {description}`
    Prescription,
    AsTyped,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReportEndpoint {
    /// Multipart file upload
    Upload,
    /// JSON text report
    Text,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ReportFormSpec {
    pub report_type: ReportType,
    pub heading: &'static str,
    pub required: &'static [DraftField],
    /// Shown but not enforced
    pub optional: &'static [DraftField],
    /// MIME types accepted; empty accepts anything
    pub accepted_types: &'static [&'static str],
    /// Extensions accepted when the browser reports no usable MIME type
    pub accepted_extensions: &'static [&'static str],
    pub max_bytes: Option<u64>,
    pub description: DescriptionRule,
    pub endpoint: ReportEndpoint,
}

impl ReportFormSpec {
    /// Text inputs of the form, required ones first
    pub fn text_fields(&self) -> Vec<DraftField> {
        self.required
            .iter()
            .chain(self.optional)
            .copied()
            .filter(DraftField::is_text)
            .collect()
    }

    pub fn accepts_files(&self) -> bool {
        self.endpoint == ReportEndpoint::Upload
    }

    /// Value for the file input's `accept` attribute
    pub fn accept_attribute(&self) -> String {
        self.accepted_types
            .iter()
            .copied()
            .chain(self.accepted_extensions.iter().copied())
            .collect::<Vec<_>>()
            .join(",")
    }
}

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];
const DOCUMENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png", "text/plain"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".txt"];

pub static REPORT_FORMS: [ReportFormSpec; 6] = [
    ReportFormSpec {
        report_type: ReportType::MedicalImage,
        heading: "Upload Medical Image",
        required: &[DraftField::Patient, DraftField::Title, DraftField::File, DraftField::Date],
        optional: &[DraftField::Description],
        accepted_types: IMAGE_TYPES,
        accepted_extensions: IMAGE_EXTENSIONS,
        max_bytes: Some(10 * MB),
        description: DescriptionRule::Titled,
        endpoint: ReportEndpoint::Upload,
    },
    ReportFormSpec {
        report_type: ReportType::Scan,
        heading: "Upload Scan",
        required: &[
            DraftField::Patient,
            DraftField::ScanType,
            DraftField::BodyPart,
            DraftField::File,
            DraftField::Date,
        ],
        optional: &[DraftField::Description],
        accepted_types: &["image/jpeg", "image/png", "application/dicom"],
        accepted_extensions: &[".jpg", ".jpeg", ".png", ".dcm"],
        max_bytes: Some(50 * MB),
        description: DescriptionRule::ScanSummary,
        endpoint: ReportEndpoint::Upload,
    },
    ReportFormSpec {
        report_type: ReportType::LabResult,
        heading: "Upload Lab Result",
        required: &[DraftField::Patient, DraftField::TestName, DraftField::File, DraftField::Date],
        optional: &[DraftField::Description],
        accepted_types: DOCUMENT_TYPES,
        accepted_extensions: DOCUMENT_EXTENSIONS,
        max_bytes: Some(10 * MB),
        description: DescriptionRule::LabTest,
        endpoint: ReportEndpoint::Upload,
    },
    ReportFormSpec {
        report_type: ReportType::Prescription,
        heading: "Upload Prescription",
        required: &[DraftField::Patient, DraftField::Medication, DraftField::File, DraftField::Date],
        optional: &[DraftField::Dosage, DraftField::Description],
        accepted_types: DOCUMENT_TYPES,
        accepted_extensions: DOCUMENT_EXTENSIONS,
        max_bytes: Some(10 * MB),
        description: DescriptionRule::Prescription,
        endpoint: ReportEndpoint::Upload,
    },
    ReportFormSpec {
        report_type: ReportType::Text,
        heading: "Write Report",
        required: &[DraftField::Patient, DraftField::Title, DraftField::Findings, DraftField::Date],
        optional: &[DraftField::Recommendations],
        accepted_types: &[],
        accepted_extensions: &[],
        max_bytes: None,
        description: DescriptionRule::AsTyped,
        endpoint: ReportEndpoint::Text,
    },
    ReportFormSpec {
        report_type: ReportType::Other,
        heading: "Upload Other Document",
        required: &[DraftField::Patient, DraftField::Description, DraftField::File, DraftField::Date],
        optional: &[],
        accepted_types: &[],
        accepted_extensions: &[],
        max_bytes: Some(25 * MB),
        description: DescriptionRule::AsTyped,
        endpoint: ReportEndpoint::Upload,
    },
];

pub fn form_spec(report_type: ReportType) -> &'static ReportFormSpec {
    match report_type {
        ReportType::MedicalImage => &REPORT_FORMS[0],
        ReportType::Scan => &REPORT_FORMS[1],
        ReportType::LabResult => &REPORT_FORMS[2],
        ReportType::Prescription => &REPORT_FORMS[3],
        ReportType::Text => &REPORT_FORMS[4],
        ReportType::Other => &REPORT_FORMS[5],
    }
}

/// Description sent with the upload, empty fragments dropped
pub fn compose_description(draft: &ReportDraft) -> String {
    let description = draft.description.trim();
    match form_spec(draft.report_type).description {
        DescriptionRule::Titled => join_non_empty(&[&draft.title, description], ": "),
        DescriptionRule::ScanSummary => {
            let head = join_non_empty(&[&draft.scan_type, &draft.body_part], " - ");
            join_non_empty(&[&head, description], ": ")
        }
        DescriptionRule::LabTest => {
            let head = labelled("Lab Test", &draft.test_name);
            join_non_empty(&[&head, description], " ")
        }
        DescriptionRule::Prescription => {
            let head = labelled("Prescription", &join_non_empty(&[&draft.medication, &draft.dosage], " "));
            join_non_empty(&[&head, description], " ")
        }
        DescriptionRule::AsTyped => description.to_string(),
    }
}

fn labelled(label: &str, value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        format!("{}: {}.", label, value.trim())
    }
}

/// What browsers report for files they cannot identify
const GENERIC_MIME: &str = "application/octet-stream";

/// Required fields first, then file type, then file size. Nothing here
/// touches the network.
pub fn validate_draft(draft: &ReportDraft) -> Result<(), ApiError> {
    let spec = form_spec(draft.report_type);

    let missing: Vec<&str> = spec
        .required
        .iter()
        .filter(|field| !field.is_filled(draft))
        .map(DraftField::label)
        .collect();
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )));
    }

    if let Some(file) = draft.file.as_ref().filter(|_| spec.accepts_files()) {
        let mime = file.content_type.trim();
        let type_ok = if spec.accepted_types.is_empty() {
            true
        } else if mime.is_empty() || mime == GENERIC_MIME {
            file.extension()
                .is_some_and(|ext| spec.accepted_extensions.contains(&format!(".{}", ext).as_str()))
        } else {
            spec.accepted_types.contains(&mime)
        };
        if !type_ok {
            return Err(ApiError::Validation(format!(
                "{} is not a supported file type for {}",
                file.file_name,
                spec.report_type.label()
            )));
        }

        if let Some(max) = spec.max_bytes {
            if file.size() > max {
                return Err(ApiError::Validation(format!(
                    "File is too large ({}), the limit is {}",
                    format_file_size(file.size()),
                    format_file_size(max)
                )));
            }
        }
    }
    Ok(())
}

#[derive(Clone, PartialEq, Debug)]
pub enum ReportPayload {
    Upload(MultipartForm),
    Text(TextReportCreate),
}

/// Validates, then builds the backend payload for the draft's type
pub fn assemble_payload(draft: &ReportDraft) -> Result<ReportPayload, ApiError> {
    validate_draft(draft)?;

    let patient_id = draft.patient_id.clone().unwrap_or_default();
    let date = draft.date.map(|d| d.format("%Y-%m-%d").to_string());

    match form_spec(draft.report_type).endpoint {
        ReportEndpoint::Text => Ok(ReportPayload::Text(TextReportCreate {
            patient_id,
            title: draft.title.trim().to_string(),
            findings: draft.findings.trim().to_string(),
            recommendations: draft.recommendations.trim().to_string(),
            date: date.unwrap_or_default(),
        })),
        ReportEndpoint::Upload => {
            let mut form = MultipartForm::new();
            if let Some(file) = draft.file.clone() {
                form = form.file("file", file);
            }
            Ok(ReportPayload::Upload(
                form.text("patient_id", patient_id)
                    .text("description", compose_description(draft))
                    .text("file_type", draft.report_type.tag())
                    .text("creator_type", "doctor")
                    .optional_text("date", date),
            ))
        }
    }
}

/// What the view does after a successful submit
#[derive(Clone, PartialEq, Debug)]
pub struct SubmitOutcome {
    pub report_id: String,
    pub message: String,
    pub redirect_to: &'static str,
    pub redirect_delay_ms: u32,
}

struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Submission logic shared by every report form
pub struct ReportFormViewModel<T> {
    api: Rc<ApiClient<T>>,
    in_flight: Cell<bool>,
}

impl<T: HttpTransport> ReportFormViewModel<T> {
    pub fn new(api: Rc<ApiClient<T>>) -> Self {
        Self { api, in_flight: Cell::new(false) }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Sends the draft. The draft is only borrowed, so on failure the form
    /// keeps everything the user typed.
    pub async fn submit(
        &self,
        draft: &ReportDraft,
        on_created: Option<&dyn Fn(&str)>,
    ) -> Result<SubmitOutcome, ApiError> {
        if self.in_flight.get() {
            return Err(ApiError::Validation("This report is already being submitted".to_string()));
        }
        let payload = assemble_payload(draft)?;

        self.in_flight.set(true);
        let _guard = InFlight(&self.in_flight);
        log::info!("📤 Submitting {} draft {}", draft.report_type.tag(), draft.draft_id);

        let result = match payload {
            ReportPayload::Upload(form) => upload_report(&*self.api, form).await.map(|r| r.id),
            ReportPayload::Text(report) => create_text_report(&*self.api, &report).await.map(|r| r.id),
        };

        match result {
            Ok(report_id) => {
                if let Some(callback) = on_created {
                    callback(&report_id);
                }
                Ok(SubmitOutcome {
                    report_id,
                    message: "Report uploaded successfully".to_string(),
                    redirect_to: REPORTS_ROUTE,
                    redirect_delay_ms: SUCCESS_REDIRECT_DELAY_MS,
                })
            }
            Err(e) => {
                log::error!("❌ Draft {} not submitted: {}", draft.draft_id, e);
                Err(e)
            }
        }
    }
}
