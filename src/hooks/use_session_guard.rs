use yew::prelude::*;

use crate::hooks::session_context::use_clinic;
use crate::viewmodels::guard_viewmodel::{GuardState, RouteGuard};

/// Runs the route guard once when the guarded subtree mounts
#[hook]
pub fn use_session_guard() -> GuardState {
    let clinic = use_clinic();
    let state = use_state(|| GuardState::Pending);

    {
        let state = state.clone();
        let session = clinic.session().clone();
        use_effect_with((), move |_| {
            let mut guard = RouteGuard::new();
            state.set(guard.evaluate(&session));
            || ()
        });
    }

    *state
}
