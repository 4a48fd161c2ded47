// ============================================================================
// STATE MODULE - Shared client state
// ============================================================================

pub mod session_state;

pub use session_state::*;
