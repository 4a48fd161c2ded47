// Shared utilities

pub mod constants;
pub mod format;
pub mod navigation;
pub mod storage;

pub use constants::*;
pub use navigation::Navigator;
pub use storage::{load_from_storage, save_to_storage, KeyValueStore, MemoryStorage};
