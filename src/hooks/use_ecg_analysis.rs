use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::models::upload::FilePart;
use crate::services::ecg_service::analyze_ecg;
use crate::viewmodels::ecg_viewmodel::{EcgViewModel, PROGRESS_TICK_MS};

pub struct UseEcgAnalysisHandle {
    /// Copy of the view model for rendering
    pub view: EcgViewModel,
    pub select_files: Callback<Vec<web_sys::File>>,
    pub remove_file: Callback<String>,
    pub analyze: Callback<()>,
}

#[hook]
pub fn use_ecg_analysis() -> UseEcgAnalysisHandle {
    let clinic = use_clinic();
    let vm: Rc<RefCell<EcgViewModel>> = use_mut_ref(EcgViewModel::new);
    let ticker = use_mut_ref(|| None::<Interval>);
    let redraw = use_force_update();

    let select_files = {
        let vm = vm.clone();
        let redraw = redraw.clone();
        Callback::from(move |files: Vec<web_sys::File>| {
            let vm = vm.clone();
            let redraw = redraw.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut parts = Vec::with_capacity(files.len());
                for file in &files {
                    match FilePart::from_web_file(file).await {
                        Ok(part) => parts.push(part),
                        Err(e) => log::error!("❌ {}", e),
                    }
                }
                vm.borrow_mut().select_files(parts);
                redraw.force_update();
            });
        })
    };

    let remove_file = {
        let vm = vm.clone();
        let redraw = redraw.clone();
        Callback::from(move |name: String| {
            vm.borrow_mut().remove_file(&name);
            redraw.force_update();
        })
    };

    let analyze = {
        let vm = vm.clone();
        let ticker = ticker.clone();
        let redraw = redraw.clone();
        let api = clinic.api.clone();
        Callback::from(move |_: ()| {
            let started = vm.borrow_mut().start();
            redraw.force_update();
            let Ok(files) = started else {
                return;
            };

            let interval = {
                let vm = vm.clone();
                let redraw = redraw.clone();
                Interval::new(PROGRESS_TICK_MS, move || {
                    vm.borrow_mut().tick();
                    redraw.force_update();
                })
            };
            *ticker.borrow_mut() = Some(interval);

            let vm = vm.clone();
            let ticker = ticker.clone();
            let redraw = redraw.clone();
            let api = api.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = analyze_ecg(&*api, files).await;
                // Dropping the interval stops the ticks
                ticker.borrow_mut().take();
                vm.borrow_mut().finish(outcome);
                redraw.force_update();
            });
        })
    };

    let view = vm.borrow().clone();
    UseEcgAnalysisHandle { view, select_files, remove_file, analyze }
}
