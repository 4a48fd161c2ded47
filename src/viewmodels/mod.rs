pub mod ecg_viewmodel;
pub mod guard_viewmodel;
pub mod list_viewmodel;
pub mod report_form_viewmodel;

pub use ecg_viewmodel::{EcgPhase, EcgViewModel};
pub use guard_viewmodel::{GuardState, RouteGuard};
pub use list_viewmodel::{ListFilter, ListViewModel, Listable};
pub use report_form_viewmodel::{form_spec, ReportFormSpec, ReportFormViewModel, SubmitOutcome, REPORT_FORMS};
