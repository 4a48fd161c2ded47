use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_ecg_analysis::use_ecg_analysis;
use crate::utils::format::format_file_size;

#[function_component(EcgView)]
pub fn ecg_view() -> Html {
    let ecg = use_ecg_analysis();
    let view = &ecg.view;

    let on_files = {
        let select_files = ecg.select_files.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(list) = input.files() else {
                return;
            };
            let files = (0..list.length()).filter_map(|i| list.get(i)).collect();
            select_files.emit(files);
        })
    };

    let on_analyze = ecg.analyze.reform(|_: MouseEvent| ());
    let running = view.phase().is_running();

    html! {
        <div class="ecg-analysis">
            <h2>{"ECG Analysis"}</h2>
            <input type="file" multiple=true accept=".dat,.hea,.atr" onchange={on_files} disabled={running} />

            <ul class="file-list">
                { for view.files().iter().map(|file| {
                    let name = file.file_name.clone();
                    let remove = ecg.remove_file.reform(move |_: MouseEvent| name.clone());
                    html! {
                        <li>
                            {format!("{} ({})", file.file_name, format_file_size(file.size()))}
                            <button type="button" onclick={remove} disabled={running}>{"✕"}</button>
                        </li>
                    }
                }) }
            </ul>

            <button class="btn-primary" onclick={on_analyze} disabled={running || view.files().is_empty()}>
                {"Analyze"}
            </button>

            <div class="progress">
                <div class="progress-bar" style={format!("width: {}%", view.progress())}></div>
                <span>{format!("{} {}%", view.phase().label(), view.progress())}</span>
            </div>

            if let Some(error) = view.error() {
                <div class="alert alert-danger">{error.user_message()}</div>
            }

            if let Some(result) = view.result() {
                <div class="ecg-result">
                    <h3>{format!("{} ({:.1}%)", result.final_prediction.class_name, result.final_prediction.confidence)}</h3>
                    if let Some(plot) = &result.signal_plot {
                        <img src={format!("data:image/png;base64,{}", plot)} alt="ECG signal" />
                    }
                    <table>
                        { for result.ranked_classes().into_iter().map(|(class, p)| html! {
                            <tr><td>{class}</td><td>{format!("{:.1}%", p * 100.0)}</td></tr>
                        }) }
                    </table>
                </div>
            }
        </div>
    }
}
