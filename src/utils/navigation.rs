/// Hard navigation out of the current view
pub trait Navigator {
    fn redirect_to_login(&self);
}

#[cfg(target_arch = "wasm32")]
pub use browser::HashNavigator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::Navigator;
    use crate::utils::constants::LOGIN_ROUTE;

    /// Hash-router navigation through `window.location`
    #[derive(Default, Clone, Copy)]
    pub struct HashNavigator;

    impl HashNavigator {
        pub fn go(&self, hash: &str) {
            if let Some(win) = web_sys::window() {
                if win.location().set_hash(hash.trim_start_matches('#')).is_err() {
                    log::error!("❌ Could not navigate to {}", hash);
                }
            }
        }
    }

    impl Navigator for HashNavigator {
        fn redirect_to_login(&self) {
            log::info!("↪️ Redirecting to login");
            self.go(LOGIN_ROUTE);
        }
    }
}
