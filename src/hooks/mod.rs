pub mod session_context;
pub mod use_ecg_analysis;
pub mod use_report_list;
pub mod use_session_guard;

pub use session_context::{use_clinic, BrowserApi, ClinicContext, SessionContextProvider};
pub use use_ecg_analysis::{use_ecg_analysis, UseEcgAnalysisHandle};
pub use use_report_list::{use_report_list, UseReportListHandle};
pub use use_session_guard::use_session_guard;
