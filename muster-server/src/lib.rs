//! Muster Server
//!
//! Monthly attendance and shift tracking for workspace rosters, backed
//! by SQLite, with styled xlsx exports of the recorded months.

pub mod api;
pub mod attendance;
pub mod core;
pub mod db;
pub mod export;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
