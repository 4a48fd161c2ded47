pub mod api_client;
pub mod appointment_service;
pub mod auth_service;
#[cfg(target_arch = "wasm32")]
pub mod browser_transport;
pub mod ecg_service;
pub mod multipart;
pub mod patient_service;
pub mod report_service;
pub mod schedule_service;
pub mod settings_service;

pub use api_client::{ApiClient, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
pub use appointment_service::*;
pub use auth_service::*;
#[cfg(target_arch = "wasm32")]
pub use browser_transport::BrowserTransport;
pub use ecg_service::*;
pub use multipart::MultipartForm;
pub use patient_service::*;
pub use report_service::*;
pub use schedule_service::*;
pub use settings_service::*;
