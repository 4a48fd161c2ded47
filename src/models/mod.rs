pub mod appointment;
pub mod auth;
pub mod ecg;
pub mod message;
pub mod patient;
pub mod report;
pub mod schedule;
pub mod settings;
pub mod upload;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use auth::{LoginRequest, TokenClaims, TokenResponse, UserType};
pub use ecg::EcgAnalysis;
pub use message::ActionMessage;
pub use patient::{Patient, PatientInput};
pub use report::{MedicalReport, ReportDraft, ReportType, TextReportCreate, UploadReportResponse};
pub use schedule::{AvailableSlots, ScheduleDay};
pub use settings::UserSettings;
pub use upload::FilePart;
