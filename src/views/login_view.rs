use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::models::auth::LoginRequest;
use crate::services::auth_service::{load_models, login};
use crate::utils::constants::HOME_ROUTE;
use crate::utils::navigation::HashNavigator;

#[function_component(LoginView)]
pub fn login_view() -> Html {
    let clinic = use_clinic();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let api = clinic.api.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }

            let request = LoginRequest {
                username: (*username).clone(),
                password: (*password).clone(),
            };
            let error = error.clone();
            let loading = loading.clone();
            let api = api.clone();

            loading.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match login(&*api, &request).await {
                    Ok(_) => {
                        // Model preloading never blocks the login
                        let preload_api = api.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Err(e) = load_models(&*preload_api).await {
                                log::warn!("⚠️ Model preload failed: {}", e);
                            }
                        });
                        HashNavigator.go(HOME_ROUTE);
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="login-screen">
            <div class="login-container">
                <div class="login-header">
                    <h1>{"Clinic Portal"}</h1>
                    <p>{"Sign in to manage your patients"}</p>
                </div>

                <form class="login-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="username">{"Username"}</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            value={(*username).clone()}
                            oninput={on_username_change}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            value={(*password).clone()}
                            oninput={on_password_change}
                            required=true
                        />
                    </div>

                    if let Some(message) = (*error).clone() {
                        <div class="alert alert-danger">{message}</div>
                    }

                    <button type="submit" class="btn-login" disabled={*loading}>
                        { if *loading { "Signing in..." } else { "Sign in" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
