use crate::state::Session;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GuardState {
    /// Check not run yet; nothing protected is rendered
    #[default]
    Pending,
    Granted,
    Denied,
}

/// Route-level gate, evaluated once per mount of the guarded subtree
#[derive(Clone, Debug, Default)]
pub struct RouteGuard {
    state: GuardState,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Resolves the gate on first call and returns the stored answer after.
    /// Exactly one redirect happens on denial: an expired token is logged
    /// out by the session itself, a missing one is redirected here.
    pub fn evaluate(&mut self, session: &Session) -> GuardState {
        if self.state != GuardState::Pending {
            return self.state;
        }

        let had_token = session.token().is_some();
        self.state = if session.is_valid() || session.refresh_if_needed() {
            GuardState::Granted
        } else {
            if !had_token {
                session.redirect_to_login();
            }
            GuardState::Denied
        };
        log::debug!("🔐 Route guard resolved: {:?}", self.state);
        self.state
    }
}
