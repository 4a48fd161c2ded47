// ============================================================================
// APP VIEW - Hash route shell
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::hooks::session_context::SessionContextProvider;
use crate::models::report::ReportType;
use crate::views::{AppLayout, Dashboard, EcgView, LoginView, ProtectedRoute, ReportForm, ReportList};

fn current_route() -> String {
    web_sys::window()
        .and_then(|win| win.location().hash().ok())
        .map(|hash| hash.trim_start_matches('#').to_string())
        .unwrap_or_default()
}

#[function_component(App)]
pub fn app() -> Html {
    let route = use_state(current_route);

    // Follow `hashchange` for the lifetime of the shell
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let win = web_sys::window();
            let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
                route.set(current_route());
            });
            if let Some(win) = &win {
                if win
                    .add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref())
                    .is_err()
                {
                    log::error!("❌ Could not listen for hash changes");
                }
            }
            move || {
                if let Some(win) = win {
                    let _ = win.remove_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref());
                }
                drop(listener);
            }
        });
    }

    let page = match route.as_str() {
        "" | "/login" => html! { <LoginView /> },
        protected => {
            let content = match protected {
                "/reports" => html! { <ReportList /> },
                "/ecg" => html! { <EcgView /> },
                other => match other.strip_prefix("/reports/new/").and_then(ReportType::from_tag) {
                    Some(report_type) => html! { <ReportForm key={report_type.tag()} report_type={report_type} /> },
                    None => html! { <Dashboard /> },
                },
            };
            html! {
                <ProtectedRoute>
                    <AppLayout route={protected.to_string()}>{content}</AppLayout>
                </ProtectedRoute>
            }
        }
    };

    html! {
        <SessionContextProvider>
            { page }
        </SessionContextProvider>
    }
}
