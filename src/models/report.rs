use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::upload::FilePart;
use crate::utils::format::parse_date;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    MedicalImage,
    Scan,
    LabResult,
    Prescription,
    #[serde(rename = "report")]
    Text,
    Other,
}

impl ReportType {
    pub const ALL: [ReportType; 6] = [
        ReportType::MedicalImage,
        ReportType::Scan,
        ReportType::LabResult,
        ReportType::Prescription,
        ReportType::Text,
        ReportType::Other,
    ];

    /// Tag stored by the backend in `file_type`
    pub fn tag(&self) -> &'static str {
        match self {
            ReportType::MedicalImage => "medical_image",
            ReportType::Scan => "scan",
            ReportType::LabResult => "lab_result",
            ReportType::Prescription => "prescription",
            ReportType::Text => "report",
            ReportType::Other => "other",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::MedicalImage => "Medical Image",
            ReportType::Scan => "Scan",
            ReportType::LabResult => "Lab Result",
            ReportType::Prescription => "Prescription",
            ReportType::Text => "Text Report",
            ReportType::Other => "Other",
        }
    }
}

/// Label for a raw `file_type` tag, unknown tags are shown as-is
pub fn report_type_label(tag: Option<&str>) -> String {
    match tag {
        Some(tag) => ReportType::from_tag(tag)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| tag.to_string()),
        None => ReportType::Other.label().to_string(),
    }
}

/// Report record as listed by the backend. File uploads and text reports
/// share the collection, so most fields are optional.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct MedicalReport {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MedicalReport {
    /// The one date used for sorting, filtering and display: the first of
    /// `date`, `uploaded_at`, `created_at` that is present and parsable.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        [&self.date, &self.uploaded_at, &self.created_at]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .filter(|raw| !raw.trim().is_empty())
            .find_map(parse_date)
    }

    /// First non-blank of title, file name and description
    pub fn display_title(&self) -> String {
        [&self.title, &self.filename, &self.description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("Untitled report")
            .to_string()
    }

    pub fn report_type(&self) -> Option<ReportType> {
        self.file_type.as_deref().and_then(ReportType::from_tag)
    }
}

/// Body of `POST /api/medical-reports/text`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TextReportCreate {
    pub patient_id: String,
    pub title: String,
    pub findings: String,
    pub recommendations: String,
    pub date: String,
}

/// Answer of `POST /api/medical-reports/upload`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UploadReportResponse {
    pub id: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Transient state of one report form. It has no identity until the
/// backend answers with an id; `draft_id` only tags log lines.
#[derive(Clone, PartialEq, Debug)]
pub struct ReportDraft {
    pub draft_id: Uuid,
    pub report_type: ReportType,
    pub patient_id: Option<String>,
    pub title: String,
    pub description: String,
    pub scan_type: String,
    pub body_part: String,
    pub test_name: String,
    pub medication: String,
    pub dosage: String,
    pub findings: String,
    pub recommendations: String,
    pub file: Option<FilePart>,
    pub date: Option<NaiveDate>,
}

impl ReportDraft {
    pub fn new(report_type: ReportType) -> Self {
        Self {
            draft_id: Uuid::new_v4(),
            report_type,
            patient_id: None,
            title: String::new(),
            description: String::new(),
            scan_type: String::new(),
            body_part: String::new(),
            test_name: String::new(),
            medication: String::new(),
            dosage: String::new(),
            findings: String::new(),
            recommendations: String::new(),
            file: None,
            date: None,
        }
    }

    /// Draft pre-bound to a patient, as opened from a patient page
    pub fn for_patient(report_type: ReportType, patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            ..Self::new(report_type)
        }
    }
}
