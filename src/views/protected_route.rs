use yew::prelude::*;

use crate::hooks::use_session_guard::use_session_guard;
use crate::viewmodels::guard_viewmodel::GuardState;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Children,
}

/// Renders its children only for a valid session. While the check is
/// pending nothing is shown; a denied check has already redirected.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    match use_session_guard() {
        GuardState::Granted => html! { <>{props.children.clone()}</> },
        GuardState::Pending | GuardState::Denied => html! {},
    }
}
