use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::models::report::ReportType;
use crate::services::auth_service::logout;

#[derive(Properties, PartialEq)]
pub struct AppLayoutProps {
    /// Current hash route, used to highlight the active link
    pub route: String,
    pub children: Children,
}

/// Static shell around every protected page: sidebar links and logout
#[function_component(AppLayout)]
pub fn app_layout(props: &AppLayoutProps) -> Html {
    let clinic = use_clinic();
    let username = clinic.session().stored_username().unwrap_or_default();
    let logging_out = use_state(|| false);

    let on_logout = {
        let api = clinic.api.clone();
        let logging_out = logging_out.clone();
        Callback::from(move |_: MouseEvent| {
            if *logging_out {
                return;
            }
            logging_out.set(true);
            let api = api.clone();
            wasm_bindgen_futures::spawn_local(async move {
                logout(&*api).await;
            });
        })
    };

    let link = |href: &'static str, label: &'static str| {
        let active = props.route == href.trim_start_matches('#');
        html! {
            <a href={href} class={classes!("nav-link", active.then_some("active"))}>{label}</a>
        }
    };

    html! {
        <div class="app-layout">
            <aside class="sidebar">
                <h1>{"Clinic Portal"}</h1>
                <nav>
                    { link("#/dashboard", "Dashboard") }
                    { link("#/reports", "Reports") }
                    { link("#/ecg", "ECG Analysis") }
                </nav>
                <div class="sidebar-footer">
                    <span class="username">{username}</span>
                    <button type="button" class="btn-logout" onclick={on_logout} disabled={*logging_out}>
                        {"Log out"}
                    </button>
                </div>
            </aside>
            <main class="content">
                {props.children.clone()}
            </main>
        </div>
    }
}

/// Landing page after login: shortcuts to the report forms
#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    html! {
        <div class="dashboard">
            <h2>{"New report"}</h2>
            <nav class="quick-links">
                { for ReportType::ALL.into_iter().map(|t| html! {
                    <a href={format!("#/reports/new/{}", t.tag())}>{t.label()}</a>
                }) }
            </nav>
        </div>
    }
}
