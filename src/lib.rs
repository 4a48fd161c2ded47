// ============================================================================
// CLINIC PORTAL - FRONTEND MVVM (RUST + YEW)
// ============================================================================
// - Models: shapes shared with the backend
// - Services: API calls only, generic over the HTTP transport
// - ViewModels: UI state and rules, testable off the browser
// - State: the login session
// - Hooks / Views: Yew glue, wasm32 only
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
pub mod hooks;
#[cfg(target_arch = "wasm32")]
pub mod views;

#[cfg(test)]
mod test_support;

pub use error::ApiError;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if config::CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 Clinic portal starting");

    yew::Renderer::<views::App>::new().render();
    Ok(())
}
