pub mod app;
pub mod ecg_view;
pub mod layout;
pub mod login_view;
pub mod protected_route;
pub mod report_form;
pub mod report_list;

pub use app::App;
pub use ecg_view::EcgView;
pub use layout::{AppLayout, Dashboard};
pub use login_view::LoginView;
pub use protected_route::ProtectedRoute;
pub use report_form::ReportForm;
pub use report_list::ReportList;
