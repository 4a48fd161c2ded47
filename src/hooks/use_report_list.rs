use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::models::report::MedicalReport;
use crate::services::report_service::{delete_report, fetch_reports};
use crate::viewmodels::list_viewmodel::{ListFilter, ListViewModel};

pub struct UseReportListHandle {
    /// Copy of the view model for rendering
    pub view: ListViewModel<MedicalReport>,
    pub set_filter: Callback<ListFilter>,
    /// Asks for confirmation, then deletes by id
    pub delete: Callback<String>,
    pub reload: Callback<()>,
}

/// Fetches every report once per mount; filtering stays client-side
#[hook]
pub fn use_report_list() -> UseReportListHandle {
    let clinic = use_clinic();
    let vm: Rc<RefCell<ListViewModel<MedicalReport>>> = use_mut_ref(ListViewModel::new);
    let redraw = use_force_update();

    let reload = {
        let vm = vm.clone();
        let redraw = redraw.clone();
        let api = clinic.api.clone();
        Callback::from(move |_: ()| {
            vm.borrow_mut().begin_load();
            redraw.force_update();

            let vm = vm.clone();
            let redraw = redraw.clone();
            let api = api.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_reports(&*api).await;
                vm.borrow_mut().finish_load(result);
                redraw.force_update();
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let set_filter = {
        let vm = vm.clone();
        let redraw = redraw.clone();
        Callback::from(move |filter: ListFilter| {
            vm.borrow_mut().filter = filter;
            redraw.force_update();
        })
    };

    let delete = {
        let vm = vm.clone();
        let redraw = redraw.clone();
        let api = clinic.api.clone();
        Callback::from(move |report_id: String| {
            let confirmed = web_sys::window()
                .and_then(|win| win.confirm_with_message("Delete this report? This cannot be undone.").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }

            let vm = vm.clone();
            let redraw = redraw.clone();
            let api = api.clone();
            wasm_bindgen_futures::spawn_local(async move {
                log::info!("🗑️ Deleting report {}", report_id);
                let result = delete_report(&*api, &report_id).await;
                // The error is kept on the view model for display
                let _ = vm.borrow_mut().finish_delete(&report_id, result);
                redraw.force_update();
            });
        })
    };

    let view = vm.borrow().clone();
    UseReportListHandle { view, set_filter, delete, reload }
}
