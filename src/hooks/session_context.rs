// ============================================================================
// SESSION CONTEXT - One session and API client for the whole app
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::{desktop_shell_url, CONFIG};
use crate::services::api_client::ApiClient;
use crate::services::browser_transport::BrowserTransport;
use crate::state::Session;

pub type BrowserApi = ApiClient<BrowserTransport>;

#[derive(Clone)]
pub struct ClinicContext {
    pub api: Rc<BrowserApi>,
}

impl PartialEq for ClinicContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
    }
}

impl ClinicContext {
    pub fn browser() -> Self {
        let shell_url = desktop_shell_url();
        let api = ApiClient::from_config(&CONFIG, shell_url.as_deref(), BrowserTransport, Session::browser());
        log::info!("🌐 API base address: {}", api.base_url());
        Self { api: Rc::new(api) }
    }

    pub fn session(&self) -> &Session {
        self.api.session()
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionContextProviderProps {
    pub children: Children,
}

/// Wraps the app so every page shares the same session
#[function_component(SessionContextProvider)]
pub fn session_context_provider(props: &SessionContextProviderProps) -> Html {
    let context = use_memo((), |_| ClinicContext::browser());

    html! {
        <ContextProvider<ClinicContext> context={(*context).clone()}>
            {props.children.clone()}
        </ContextProvider<ClinicContext>>
    }
}

/// Shared context, or a fresh browser one outside the provider
#[hook]
pub fn use_clinic() -> ClinicContext {
    use_context::<ClinicContext>().unwrap_or_else(ClinicContext::browser)
}
