// ============================================================================
// SESSION STATE - Bearer token ownership and validity checks
// ============================================================================
// The only module that reads or writes the auth keys of the store. Every
// other layer goes through `is_valid`, `current_subject` and `logout`.
// ============================================================================

use std::rc::Rc;

use crate::models::auth::{TokenClaims, TokenResponse};
use crate::utils::constants::{AUTH_STORAGE_KEYS, STORAGE_KEY_TOKEN, STORAGE_KEY_USERNAME};
use crate::utils::navigation::Navigator;
use crate::utils::storage::KeyValueStore;

/// Current login, backed by the shared key-value store
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
    navigator: Rc<dyn Navigator>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && Rc::ptr_eq(&self.navigator, &other.navigator)
    }
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Session over `localStorage` with hash-router redirects
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::utils::navigation::HashNavigator;
        use crate::utils::storage::BrowserStorage;
        Self::new(Rc::new(BrowserStorage), Rc::new(HashNavigator))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Raw bearer token, valid or not
    pub fn token(&self) -> Option<String> {
        self.store
            .get(STORAGE_KEY_TOKEN)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn stored_username(&self) -> Option<String> {
        self.store.get(STORAGE_KEY_USERNAME)
    }

    fn claims(&self) -> Option<TokenClaims> {
        TokenClaims::decode(&self.token()?)
    }

    /// False when the token is absent, malformed or expired. Never panics.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp())
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        match self.claims() {
            Some(claims) => !claims.is_expired_at(now),
            None => false,
        }
    }

    /// Username embedded in a valid token
    pub fn current_subject(&self) -> Option<String> {
        self.current_subject_at(chrono::Utc::now().timestamp())
    }

    pub fn current_subject_at(&self, now: i64) -> Option<String> {
        self.claims()
            .filter(|claims| !claims.is_expired_at(now))
            .and_then(|claims| claims.sub)
    }

    /// There is no refresh endpoint: a valid token counts as refreshed, a
    /// missing one as not refreshed, and an expired or unreadable one ends
    /// the session with a redirect to the login page.
    pub fn refresh_if_needed(&self) -> bool {
        self.refresh_if_needed_at(chrono::Utc::now().timestamp())
    }

    pub fn refresh_if_needed_at(&self, now: i64) -> bool {
        if self.token().is_none() {
            return false;
        }
        if self.is_valid_at(now) {
            return true;
        }
        log::warn!("⏰ Session token expired, logging out");
        self.logout();
        false
    }

    /// Stores a freshly issued token, replacing any previous one
    pub fn begin(&self, response: &TokenResponse) -> Result<(), String> {
        self.store.set(STORAGE_KEY_TOKEN, &response.access_token)?;
        match response.username.as_deref() {
            Some(username) => self.store.set(STORAGE_KEY_USERNAME, username)?,
            None => self.store.remove(STORAGE_KEY_USERNAME)?,
        }
        log::info!("🔐 Session started for {}", response.username.as_deref().unwrap_or("unknown user"));
        Ok(())
    }

    /// Removes every auth-related key. Idempotent.
    pub fn clear(&self) {
        for key in AUTH_STORAGE_KEYS {
            if let Err(e) = self.store.remove(key) {
                log::error!("❌ {}", e);
            }
        }
    }

    /// Local logout sequence: wipe the auth keys, then leave for the login page
    pub fn logout(&self) {
        self.clear();
        log::info!("👋 Logged out");
        self.navigator.redirect_to_login();
    }

    /// Leave for the login page without touching the store
    pub fn redirect_to_login(&self) {
        self.navigator.redirect_to_login();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{jwt, RecordingNavigator};
    use crate::utils::constants::{STORAGE_KEY_MODELS_LOADED, STORAGE_KEY_THEME};
    use crate::utils::storage::MemoryStorage;

    const NOW: i64 = 1_700_000_000;

    fn session() -> (Session, Rc<MemoryStorage>, Rc<RecordingNavigator>) {
        let store = Rc::new(MemoryStorage::new());
        let navigator = Rc::new(RecordingNavigator::default());
        (Session::new(store.clone(), navigator.clone()), store, navigator)
    }

    #[test]
    fn absent_token_is_invalid_and_has_no_subject() {
        let (session, _, _) = session();
        assert!(!session.is_valid_at(NOW));
        assert_eq!(session.current_subject_at(NOW), None);
    }

    #[test]
    fn token_expiring_at_or_before_now_is_invalid() {
        let (session, store, _) = session();
        for exp in [NOW - 3600, NOW - 1, NOW] {
            store.set(STORAGE_KEY_TOKEN, &jwt("dr.haddad", exp)).unwrap();
            assert!(!session.is_valid_at(NOW), "exp {} should be invalid", exp);
            assert_eq!(session.current_subject_at(NOW), None);
        }
    }

    #[test]
    fn token_expiring_after_now_is_valid() {
        let (session, store, _) = session();
        for exp in [NOW + 1, NOW + 3600] {
            store.set(STORAGE_KEY_TOKEN, &jwt("dr.haddad", exp)).unwrap();
            assert!(session.is_valid_at(NOW));
            assert_eq!(session.current_subject_at(NOW).as_deref(), Some("dr.haddad"));
        }
    }

    #[test]
    fn garbage_token_is_invalid_without_panicking() {
        let (session, store, _) = session();
        store.set(STORAGE_KEY_TOKEN, "definitely.not.jwt").unwrap();
        assert!(!session.is_valid_at(NOW));
        store.set(STORAGE_KEY_TOKEN, "").unwrap();
        assert!(!session.is_valid_at(NOW));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn refresh_without_token_does_nothing() {
        let (session, _, navigator) = session();
        assert!(!session.refresh_if_needed_at(NOW));
        assert_eq!(navigator.redirects(), 0);
    }

    #[test]
    fn refresh_with_valid_token_counts_as_refreshed() {
        let (session, store, navigator) = session();
        store.set(STORAGE_KEY_TOKEN, &jwt("u", NOW + 60)).unwrap();
        assert!(session.refresh_if_needed_at(NOW));
        assert_eq!(navigator.redirects(), 0);
        assert!(session.token().is_some());
    }

    #[test]
    fn refresh_with_expired_token_logs_out_and_redirects() {
        let (session, store, navigator) = session();
        store.set(STORAGE_KEY_TOKEN, &jwt("u", NOW - 60)).unwrap();
        store.set(STORAGE_KEY_USERNAME, "u").unwrap();
        assert!(!session.refresh_if_needed_at(NOW));
        assert_eq!(navigator.redirects(), 1);
        assert_eq!(session.token(), None);
        assert_eq!(session.stored_username(), None);
    }

    #[test]
    fn begin_replaces_previous_token() {
        let (session, _, _) = session();
        let first = TokenResponse { access_token: jwt("a", NOW + 60), token_type: "bearer".into(), username: Some("a".into()) };
        let second = TokenResponse { access_token: jwt("b", NOW + 60), token_type: "bearer".into(), username: None };
        session.begin(&first).unwrap();
        session.begin(&second).unwrap();
        assert_eq!(session.current_subject_at(NOW).as_deref(), Some("b"));
        assert_eq!(session.stored_username(), None);
    }

    #[test]
    fn logout_removes_auth_keys_but_keeps_theme() {
        let (session, store, navigator) = session();
        store.set(STORAGE_KEY_TOKEN, &jwt("u", NOW + 60)).unwrap();
        store.set(STORAGE_KEY_USERNAME, "u").unwrap();
        store.set(STORAGE_KEY_MODELS_LOADED, "true").unwrap();
        store.set(STORAGE_KEY_THEME, "dark").unwrap();

        session.logout();

        for key in AUTH_STORAGE_KEYS {
            assert_eq!(store.get(key), None, "{} should be cleared", key);
        }
        assert_eq!(store.get(STORAGE_KEY_THEME).as_deref(), Some("dark"));
        assert_eq!(navigator.redirects(), 1);
    }

    #[test]
    fn sessions_compare_by_shared_store() {
        let (first, _, _) = session();
        let (other, _, _) = session();
        assert!(first == first.clone());
        assert!(first != other);
    }
}
