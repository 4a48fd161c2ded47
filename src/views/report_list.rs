use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::hooks::use_report_list::use_report_list;
use crate::models::report::{report_type_label, ReportType};
use crate::models::settings::DateFormat;
use crate::services::report_service::report_download_url;
use crate::utils::format::{format_date, parse_date};
use crate::viewmodels::list_viewmodel::{ListFilter, Listable};

#[function_component(ReportList)]
pub fn report_list() -> Html {
    let clinic = use_clinic();
    let reports = use_report_list();
    let view = &reports.view;
    let filter = view.filter.clone();

    // Each control rewrites one field of the current filter
    let update = |apply: fn(&mut ListFilter, String)| {
        let set_filter = reports.set_filter.clone();
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let value = match e.target_dyn_into::<HtmlSelectElement>() {
                Some(select) => select.value(),
                None => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            let mut next = filter.clone();
            apply(&mut next, value);
            set_filter.emit(next);
        })
    };

    let on_search = {
        let set_filter = reports.set_filter.clone();
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_filter.emit(ListFilter { search: input.value(), ..filter.clone() });
        })
    };

    let rows = view.visible();

    html! {
        <div class="report-list">
            <div class="list-header">
                <h2>{"Medical Reports"}</h2>
                <a class="btn-primary" href="#/reports/new/medical_image">{"New report"}</a>
            </div>

            <div class="filters">
                <input type="search" placeholder="Search by title or patient" value={filter.search.clone()} oninput={on_search} />
                <select onchange={update(|f, v| f.type_tag = Some(v))}>
                    <option value="all">{"All types"}</option>
                    { for ReportType::ALL.into_iter().map(|t| html! {
                        <option value={t.tag()} selected={filter.type_tag.as_deref() == Some(t.tag())}>{t.label()}</option>
                    }) }
                </select>
                <input type="date" onchange={update(|f, v| f.from = parse_date(&v))} />
                <input type="date" onchange={update(|f, v| f.to = parse_date(&v))} />
            </div>

            if view.is_loading() {
                <p class="loading">{"Loading reports..."}</p>
            }
            if let Some(error) = view.error() {
                <div class="alert alert-danger">
                    {error.user_message()}
                    if error.is_retryable() {
                        <button type="button" onclick={reports.reload.reform(|_: MouseEvent| ())}>{"Retry"}</button>
                    }
                </div>
            }

            <table class="table">
                <thead>
                    <tr><th>{"Title"}</th><th>{"Type"}</th><th>{"Patient"}</th><th>{"Date"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|report| {
                        let id = report.id().to_string();
                        let on_delete = reports.delete.reform(move |_: MouseEvent| id.clone());
                        let date = report
                            .effective_date()
                            .map(|d| format_date(d, DateFormat::default()))
                            .unwrap_or_else(|| "N/A".to_string());
                        html! {
                            <tr key={report.id.clone()}>
                                <td>{report.display_title()}</td>
                                <td>{report_type_label(report.file_type.as_deref())}</td>
                                <td>{report.patient_name.clone().unwrap_or_default()}</td>
                                <td>{date}</td>
                                <td>
                                    if report.filename.is_some() {
                                        <a href={report_download_url(&*clinic.api, &report.id)} target="_blank">{"Download"}</a>
                                    }
                                    <button type="button" class="btn-danger" onclick={on_delete}>{"Delete"}</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>

            if rows.is_empty() && !view.is_loading() {
                <p class="empty">{"No reports match the current filters."}</p>
            }
        </div>
    }
}
