// ============================================================================
// REPORT FORM - One component for every report type
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::models::patient::Patient;
use crate::models::report::{ReportDraft, ReportType};
use crate::models::upload::FilePart;
use crate::services::patient_service::fetch_patients;
use crate::utils::format::format_file_size;
use crate::utils::navigation::HashNavigator;
use crate::viewmodels::report_form_viewmodel::{form_spec, DraftField, ReportFormViewModel};

#[derive(Properties, PartialEq)]
pub struct ReportFormProps {
    pub report_type: ReportType,
    /// Set when the form is opened from a patient page
    #[prop_or_default]
    pub patient_id: Option<String>,
    #[prop_or_default]
    pub on_created: Option<Callback<String>>,
}

#[function_component(ReportForm)]
pub fn report_form(props: &ReportFormProps) -> Html {
    let clinic = use_clinic();
    let spec = form_spec(props.report_type);

    let draft = use_state(|| match &props.patient_id {
        Some(id) => ReportDraft::for_patient(props.report_type, id.clone()),
        None => ReportDraft::new(props.report_type),
    });
    let patients = use_state(Vec::<Patient>::new);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);
    let submitting = use_state(|| false);
    let view_model = {
        let api = clinic.api.clone();
        use_memo((), move |_| ReportFormViewModel::new(api))
    };

    // Patient picker only when no patient was given
    {
        let patients = patients.clone();
        let error = error.clone();
        let api = clinic.api.clone();
        let needs_picker = props.patient_id.is_none();
        use_effect_with((), move |_| {
            if needs_picker {
                wasm_bindgen_futures::spawn_local(async move {
                    match fetch_patients(&*api).await {
                        Ok(list) => patients.set(list),
                        Err(e) => error.set(Some(e.user_message())),
                    }
                });
            }
            || ()
        });
    }

    let on_field = |field: DraftField| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let value = if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                select.value()
            } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                area.value()
            } else {
                e.target_unchecked_into::<HtmlInputElement>().value()
            };
            let mut next = (*draft).clone();
            field.write(&mut next, value);
            draft.set(next);
        })
    };

    let on_file = {
        let draft = draft.clone();
        let error = error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let draft = draft.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match FilePart::from_web_file(&file).await {
                    Ok(part) => {
                        let mut next = (*draft).clone();
                        next.file = Some(part);
                        draft.set(next);
                    }
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let success = success.clone();
        let submitting = submitting.clone();
        let view_model: Rc<_> = view_model.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let snapshot = (*draft).clone();
            let error = error.clone();
            let success = success.clone();
            let submitting = submitting.clone();
            let view_model = view_model.clone();
            let on_created = on_created.clone();

            error.set(None);
            submitting.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let notify = |id: &str| {
                    if let Some(callback) = &on_created {
                        callback.emit(id.to_string());
                    }
                };
                match view_model.submit(&snapshot, Some(&notify)).await {
                    Ok(outcome) => {
                        success.set(Some(outcome.message));
                        let target = outcome.redirect_to;
                        Timeout::new(outcome.redirect_delay_ms, move || HashNavigator.go(target)).forget();
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
                submitting.set(false);
            });
        })
    };

    let text_inputs = spec.text_fields().into_iter().map(|field| {
        let required = spec.required.contains(&field);
        let long = matches!(field, DraftField::Findings | DraftField::Recommendations | DraftField::Description);
        html! {
            <div class="form-group">
                <label>{field.label()}{ if required { " *" } else { "" } }</label>
                if long {
                    <textarea value={field.value(&draft).to_string()} onchange={on_field(field)} />
                } else {
                    <input type="text" value={field.value(&draft).to_string()} onchange={on_field(field)} />
                }
            </div>
        }
    });

    html! {
        <form class="report-form" onsubmit={on_submit}>
            <h2>{spec.heading}</h2>

            if props.patient_id.is_none() {
                <div class="form-group">
                    <label>{"patient *"}</label>
                    <select onchange={on_field(DraftField::Patient)}>
                        <option value="">{"Select a patient"}</option>
                        { for patients.iter().map(|p| html! {
                            <option value={p.id.clone()} selected={draft.patient_id.as_deref() == Some(p.id.as_str())}>
                                {p.full_name()}
                            </option>
                        }) }
                    </select>
                </div>
            }

            { for text_inputs }

            <div class="form-group">
                <label>{"date *"}</label>
                <input type="date" onchange={on_field(DraftField::Date)} />
            </div>

            if spec.accepts_files() {
                <div class="form-group">
                    <label>{"file *"}</label>
                    <input type="file" accept={spec.accept_attribute()} onchange={on_file} />
                    if let Some(file) = &draft.file {
                        <small>{format!("{} ({})", file.file_name, format_file_size(file.size()))}</small>
                    }
                    if let Some(max) = spec.max_bytes {
                        <small class="hint">{format!("Max {}", format_file_size(max))}</small>
                    }
                </div>
            }

            if let Some(message) = (*error).clone() {
                <div class="alert alert-danger">{message}</div>
            }
            if let Some(message) = (*success).clone() {
                <div class="alert alert-success">{message}</div>
            }

            <button type="submit" class="btn-primary" disabled={*submitting}>
                { if *submitting { "Submitting..." } else { "Submit" } }
            </button>
        </form>
    }
}

