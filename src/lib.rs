pub mod chat_log;
pub mod completion;
pub mod constants;
pub mod engine;
pub mod format;
pub mod health;
pub mod logging;
pub mod main_helper;
pub mod specs;
pub mod types;

pub use types::*;

pub use main_helper::{AppState, Args};
